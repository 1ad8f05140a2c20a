//! Jobs domain: employer-authored job postings with public browsing

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
// Re-export repository types
pub use repository::{JobChanges, JobRepository, JobSearchFilters};

// Re-export API types
pub use api::routes;
pub use api::JobsState;
