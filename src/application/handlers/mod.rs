//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod decision;

pub use auth::{
    AuthenticatedSession, LoginCommand, LoginHandler, RegisterUserCommand, RegisterUserHandler,
};
pub use decision::{
    AddItemCommand, AddItemHandler, CreateDecisionCommand, CreateDecisionHandler,
    DecisionLists, DeleteDecisionCommand, DeleteDecisionHandler, DeleteItemCommand,
    DeleteItemHandler, GetDecisionHandler, GetDecisionQuery, ListDecisionsHandler,
    ListDecisionsQuery, UpdateDecisionCommand, UpdateDecisionHandler, UpdateItemCommand,
    UpdateItemHandler,
};
