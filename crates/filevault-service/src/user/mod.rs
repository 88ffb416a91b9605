//! User registration.

pub mod service;

pub use service::{RegisterUser, UserService};
