//! Shop records and the atomic serviceable-product attach.

mod actions;
pub mod entity;

pub use actions::*;
