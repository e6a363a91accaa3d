//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` and `TokenIssuer` ports:
//!
//! - `jwt` - HS256 tokens signed with a shared secret
//! - `mock` - Test implementation that doesn't need any key material

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtTokenService};
pub use mock::MockSessionValidator;
