//! Repository layer for the Applications domain

mod applications;

pub use applications::{ApplicationRepository, JobRef};
