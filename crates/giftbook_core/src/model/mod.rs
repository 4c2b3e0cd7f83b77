//! Domain model for people and their gift ideas.
//!
//! # Responsibility
//! - Define the canonical records owned by the people store.
//! - Parse the birthday sort key out of the stored `dob` text.
//! - Offer caller-side drafts that validate raw input before it reaches
//!   the store.
//!
//! # Invariants
//! - Every person and idea is identified by a stable UUID.
//! - Each idea is owned by exactly one person.

pub mod birthday;
pub mod draft;
pub mod idea;
pub mod person;
