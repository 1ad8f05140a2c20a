//! API endpoint integration tests
//!
//! Exercise the store-level behaviors the unit tests cannot reach:
//! uniqueness constraints, cascades, and cross-user authorization against a
//! real Postgres database. Every test skips itself when no test database is
//! configured (TEST_DATABASE_URL or DATABASE_URL).

#![allow(dead_code)]

mod accounts;
mod applications;
mod common;
mod jobs;
