//! User records: creation and validation.

pub mod entity;
