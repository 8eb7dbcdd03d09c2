//! vSphere / IBM Cloud capacity data generation
//!
//! Correlates vCenter topology (failure domains, clusters, port groups) with
//! IBM Cloud classic infrastructure (datacenter pods, VLAN subnets) into one
//! merged configuration for the capacity manager.

pub mod config;
pub mod correlation;
pub mod credentials;
pub mod domain;
pub mod errors;
pub mod inventory;
pub mod output;

// Re-export commonly used types
pub use config::GenerateConfig;
pub use correlation::{CorrelationOrchestrator, CorrelationSettings};
pub use domain::{Diagnostic, DiagnosticKind, MatchedNetwork, MergedEnvironmentConfig};
pub use errors::{CorrelationError, CorrelationResult};
pub use output::write_artifact;
