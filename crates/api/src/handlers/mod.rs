pub mod funding;
pub mod ledger;
pub mod profile;
pub mod project;
