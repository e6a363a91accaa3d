//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `decision` - Decision aggregate and its pro/con items
//! - `scoring` - Pure recommendation and tilt computation
//! - `user` - Accounts, password policy and password hashing

pub mod decision;
pub mod foundation;
pub mod scoring;
pub mod user;
