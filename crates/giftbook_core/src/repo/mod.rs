//! Persistence layer for people snapshots.
//!
//! # Responsibility
//! - Define the durable key-value contract used by the people store.
//! - Encode/decode the full people collection as one snapshot value.
//! - Move snapshot writes off the caller thread when requested.
//!
//! # Invariants
//! - Storage is addressed only by key; it never interprets values.
//! - Read paths reject invalid snapshots instead of masking them.

pub mod kv_store;
pub mod snapshot;
pub mod writer;
