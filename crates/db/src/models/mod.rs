//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create/upsert DTO
//! - An update DTO (all `Option` fields) where the entity supports patches
//!
//! Wire names are camelCase; columns are snake_case.

pub mod contribution;
pub mod funding_tier;
pub mod project;
pub mod user_profile;
