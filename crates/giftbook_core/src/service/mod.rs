//! Core use-case services.
//!
//! # Responsibility
//! - Expose the people store operations consumed by presentation layers.
//! - Keep callers decoupled from snapshot encoding and storage details.

pub mod observer;
pub mod people_store;
