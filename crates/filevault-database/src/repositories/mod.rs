//! PostgreSQL implementations of the store traits.

pub mod file;
pub mod share;
pub mod user;

pub use file::FileRepository;
pub use share::ShareRepository;
pub use user::UserRepository;
