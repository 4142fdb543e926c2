//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod contribution_repo;
pub mod funding_tier_repo;
pub mod project_repo;
pub mod user_profile_repo;

pub use contribution_repo::{ContributionRepo, RecordOutcome};
pub use funding_tier_repo::FundingTierRepo;
pub use project_repo::{ProjectRepo, UpdateOutcome};
pub use user_profile_repo::UserProfileRepo;
