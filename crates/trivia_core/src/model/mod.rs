//! Domain model for the trivia store.
//!
//! # Responsibility
//! - Define the records shared by repositories, services and the HTTP layer.
//!
//! # Invariants
//! - Identifiers are assigned by the store and never reused.
//! - Categories are read-only once seeded.

pub mod category;
pub mod question;
