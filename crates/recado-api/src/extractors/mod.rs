//! Request extractors

mod auth;
mod validated;

pub use auth::CurrentUser;
pub use validated::ValidatedJson;
