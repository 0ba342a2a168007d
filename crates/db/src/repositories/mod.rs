//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod completion_repo;
pub mod unit_repo;
pub mod user_repo;

pub use assignment_repo::AssignmentRepo;
pub use completion_repo::CompletionRepo;
pub use unit_repo::UnitRepo;
pub use user_repo::UserRepo;
