//! # filevault-entity
//!
//! Domain entity models for FileVault. Every struct in this crate
//! represents a catalog row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and catalog
//! rows additionally derive `sqlx::FromRow`.

pub mod file;
pub mod share;
pub mod user;
