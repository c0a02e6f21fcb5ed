//! Campaign web backend libraries
//!
//! Facade over the workspace crates used by the web handlers:
//! - [`campaign_cache`]: snapshot cache, stores, event reconciliation
//! - [`campaign_access`]: membership, aggregation and campaign workflows

pub use campaign_access;
pub use campaign_cache;
