//! Concrete implementations of the domain capabilities

pub mod config;
pub mod jenkins;
