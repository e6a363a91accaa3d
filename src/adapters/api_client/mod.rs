//! Backend API client adapters.

mod http_decision_api;

pub use http_decision_api::{ApiClientConfig, HttpDecisionApi};
