//! RootPilot Core: domain models, error taxonomy and repository
//! traits shared by every other crate.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{RootPilotError, RootPilotResult};
