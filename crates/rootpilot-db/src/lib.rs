//! RootPilot store: a volatile, in-memory entity store and the
//! repository implementations built on it.
//!
//! This crate provides:
//! - The store handle ([`MemStore`]) whose lifecycle is owned by the
//!   process entry point (or by each test)
//! - One repository per entity kind ([`repository`])
//! - Error types ([`DbError`])

mod error;
pub mod repository;
mod store;

pub use error::DbError;
pub use store::{MemStore, StoreStats};
