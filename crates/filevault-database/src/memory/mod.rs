//! Process-local store implementations.
//!
//! Used for the `memory` database provider and in tests. They enforce the
//! same uniqueness rules as the PostgreSQL schema.

mod file;
mod share;
mod user;

pub use file::InMemoryFileStore;
pub use share::InMemoryShareStore;
pub use user::InMemoryUserStore;
