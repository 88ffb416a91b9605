//! File domain entities.

pub mod model;

pub use model::{CreateFile, File, MAX_FILE_NAME_LEN};
