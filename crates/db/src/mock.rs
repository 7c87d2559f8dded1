//! Test doubles for the appointment store.

pub mod memory;
pub mod repositories;
