//! Domain model for the todo collection.
//!
//! # Responsibility
//! - Define the canonical record and request shapes used by core logic.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod todo;
