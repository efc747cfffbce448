//! Domain models for RootPilot.
//!
//! Every entity carries an opaque UUID assigned by the store at
//! creation. Wire names are camelCase to match the dashboard client.

pub mod action_item;
pub mod incident;
pub mod project;
pub mod rca_result;
pub mod user;
