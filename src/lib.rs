//! PivotPoint - Weighted Pros/Cons Decision Support
//!
//! This crate scores decisions from weighted pros and cons, serves them through
//! a small authenticated REST backend, and provides the client-side state
//! container that mirrors that backend.

pub mod adapters;
pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;
