pub mod access;
pub mod boundary;
pub mod guard;

pub use guard::{AccessRule, require};
