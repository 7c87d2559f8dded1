//! # Lexcita Core
//!
//! Domain types and the pure rules of the law-firm booking service. Nothing
//! in this crate touches the network or the database.

pub mod calendar;
pub mod chatbot;
pub mod errors;
pub mod identity;
pub mod models;
pub mod report;
pub mod scheduling;
