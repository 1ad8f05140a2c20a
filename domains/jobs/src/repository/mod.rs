//! Repository layer for the Jobs domain

mod jobs;

pub use jobs::{JobChanges, JobRepository, JobSearchFilters};
