//! Database models shared across the repository.

pub mod company;
pub mod config;
pub mod employee;
