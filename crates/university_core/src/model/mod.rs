//! Domain model for university staff records.
//!
//! # Responsibility
//! - Define the lecturer and department records shared by repos and services.
//! - Keep identity conventions in one place.
//!
//! # Invariants
//! - Persisted records always carry a positive id.
//! - `UNASSIGNED_ID` (0) marks a record that has not been saved yet.

pub mod department;
pub mod lecturer;

/// Id value carried by records the store has not assigned an id to yet.
pub const UNASSIGNED_ID: i64 = 0;
