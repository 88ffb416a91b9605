//! Login and bearer-token authentication.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
