//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store contract the collection API is written against.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   store transport errors.

pub mod todo_repo;
