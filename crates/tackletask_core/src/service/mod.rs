//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations the shell invokes.
//! - Keep the shell decoupled from SQL and connection details.

pub mod tracker_service;
