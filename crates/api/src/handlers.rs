pub mod action;
pub mod appointment;
pub mod auth;
pub mod calendar;
pub mod chatbot;
pub mod client;
pub mod company;
pub mod consultation;
pub mod contact;
pub mod identity;
pub mod lawyer;
pub mod report;
pub mod service;
