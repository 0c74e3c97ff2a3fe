pub mod ids;
pub mod user;
pub mod shop;
pub mod product;
pub mod inventory;

pub use user::*;
pub use shop::*;
pub use product::*;
pub use inventory::*;
