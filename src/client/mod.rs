//! Client side of PivotPoint.
//!
//! `DecisionBoard` is the state container a UI drives. It mirrors the
//! backend through the `DecisionApi` port and keeps the login in an
//! `AuthSession` backed by a `LocalStore`. Rendering lives elsewhere.

mod board;
mod model;
mod session;
mod theme;

#[cfg(test)]
pub(crate) mod testing;

pub use board::{BoardError, DecisionBoard, SESSION_EXPIRED};
pub use model::BoardDecision;
pub use session::{
    AuthSession, RegistrationForm, SessionError, StoredUser, TOKEN_KEY, USER_KEY,
};
pub use theme::{ThemePreference, DARK_MODE_KEY};
