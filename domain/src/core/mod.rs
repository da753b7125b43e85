//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the model-selection value sent to the assistant endpoint
//! - [`query::Query`]: validated user input for one chat turn
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod query;
