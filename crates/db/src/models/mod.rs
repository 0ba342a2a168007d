//! Row models and DTOs, one module per table.

pub mod assignment;
pub mod completion;
pub mod unit;
pub mod user;
