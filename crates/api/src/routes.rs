pub mod action;
pub mod appointment;
pub mod assistant;
pub mod auth;
pub mod calendar;
pub mod directory;
pub mod health;
pub mod inquiry;
pub mod report;
