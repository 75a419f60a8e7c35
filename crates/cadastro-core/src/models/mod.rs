//! Domain models for the cadastro system.

mod patient;
mod vehicle;

pub use patient::*;
pub use vehicle::*;
