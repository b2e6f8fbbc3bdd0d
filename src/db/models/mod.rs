//! Database models split into domain-specific modules.

pub mod account;
pub mod inventory;

pub use account::*;
pub use inventory::*;
