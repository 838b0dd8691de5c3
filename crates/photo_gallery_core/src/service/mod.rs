//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate capability calls into gallery use-cases.
//! - Keep FFI/CLI layers decoupled from storage details.

pub mod photo_service;
