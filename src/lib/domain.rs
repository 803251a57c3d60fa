//! Domain types and capabilities

pub mod notifications;
