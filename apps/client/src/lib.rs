//! FairDeal client: submits employment contracts to the analysis service and
//! turns the returned analysis into a navigable report.

pub mod analytics;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod persistence;
pub mod presentation;
pub mod progress;
pub mod upload;
