//! PaperFans domain logic.
//!
//! Pure rules and helpers shared by the database and API crates: the
//! error type, validation for projects, funding and profiles, and the
//! ledger command bridge that drives the external chain CLI.

pub mod address;
pub mod error;
pub mod funding;
pub mod ledger;
pub mod pagination;
pub mod profile;
pub mod project;
pub mod types;
