//! User accounts.
//!
//! Usernames and passwords are validated here; passwords are only ever
//! stored as [`PasswordHash`]es.

mod account;
mod errors;
mod password;
#[allow(clippy::module_inception)]
mod user;

pub use account::{
    Email, PasswordPolicy, Username, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use errors::AccountError;
pub use password::{PasswordHash, DEFAULT_ITERATIONS};
pub use user::{NewUser, User};
