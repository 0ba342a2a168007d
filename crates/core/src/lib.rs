//! Pure domain logic for the classroom portal.
//!
//! Nothing in this crate performs I/O. Persistence lives in `classroom-db`
//! and the HTTP surface in `classroom-api`.

pub mod error;
pub mod humanize;
pub mod pagination;
pub mod ranking;
pub mod roles;
pub mod types;
pub mod validation;
