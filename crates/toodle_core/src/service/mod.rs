//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the C boundary decoupled from storage details.

pub mod login_service;
