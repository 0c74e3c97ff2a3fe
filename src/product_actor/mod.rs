//! Product records: creation and price validation.

pub mod entity;
