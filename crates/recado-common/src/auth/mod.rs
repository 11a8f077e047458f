//! Session authentication

mod session;

pub use session::{Identity, SessionClaims, SessionService, SESSION_COOKIE};
