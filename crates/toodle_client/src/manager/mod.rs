//! Manager facades over the store context.
//!
//! Managers hold only a borrow of the `Store`; entities they return hold no
//! reference back.

pub mod categories;
pub mod items;
pub mod labels;
pub mod logins;
