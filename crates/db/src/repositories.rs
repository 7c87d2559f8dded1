pub mod appointment;
pub mod client;
pub mod company;
pub mod consultation;
pub mod contact;
pub mod lawyer;
pub mod service;
pub mod user;
