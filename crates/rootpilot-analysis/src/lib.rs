//! RootPilot Analysis: the [`AnalysisEngine`] capability, a templated
//! mock engine, and the service that drives incident/project status
//! through an analysis run and persists what the engine produces.

pub mod engine;
pub mod mock;
pub mod service;

pub use engine::{AnalysisEngine, IncidentAnalysis, ProjectAnalysis};
pub use mock::MockAnalysisEngine;
pub use service::{AnalysisService, RcaReport};
