//! # filevault-database
//!
//! Store traits for the credential store, file catalog and share registry,
//! with PostgreSQL repositories and process-local in-memory implementations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod stores;
pub mod traits;

pub use connection::DatabasePool;
pub use stores::Stores;
pub use traits::{FileStore, ShareStore, UserStore};
