//! Domain entities for the Accounts domain

pub mod entities;
