//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (write) and queries (read) each get their own handler.

pub mod handlers;

pub use handlers::{
    // Account handlers
    AuthenticatedSession, LoginCommand, LoginHandler, RegisterUserCommand, RegisterUserHandler,
    // Decision handlers
    AddItemCommand, AddItemHandler, CreateDecisionCommand, CreateDecisionHandler,
    DecisionLists, DeleteDecisionCommand, DeleteDecisionHandler, DeleteItemCommand,
    DeleteItemHandler, GetDecisionHandler, GetDecisionQuery, ListDecisionsHandler,
    ListDecisionsQuery, UpdateDecisionCommand, UpdateDecisionHandler, UpdateItemCommand,
    UpdateItemHandler,
};
