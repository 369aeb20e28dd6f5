//! Domain entities.
//!
//! # Responsibility
//! - Wrap exactly one boundary handle per entity.
//! - Read and write fields through the codec on every access.
//!
//! # Invariants
//! - Scalar fields are never cached; only relations are.
//! - Setters change the entity's boundary record immediately. Persisting
//!   that record to the store is a manager call.

pub mod category;
pub mod item;
pub mod label;
pub mod login;
