//! Account handlers: registration and login.

mod login;
mod register_user;

pub use login::{LoginCommand, LoginHandler};
pub use register_user::{AuthenticatedSession, RegisterUserCommand, RegisterUserHandler};
