// Copyright (c) 2025 - Cowboy AI, Inc.
//! Artifact writer

use std::path::Path;
use tracing::info;

use crate::domain::MergedEnvironmentConfig;
use crate::errors::CorrelationResult;

/// Pretty JSON with two-space indentation
pub fn render_artifact(env: &MergedEnvironmentConfig) -> CorrelationResult<String> {
    Ok(serde_json::to_string_pretty(env)?)
}

/// Write the merged configuration to `path`, replacing any existing file
pub fn write_artifact(env: &MergedEnvironmentConfig, path: impl AsRef<Path>) -> CorrelationResult<()> {
    let path = path.as_ref();
    let rendered = render_artifact(env)?;
    std::fs::write(path, rendered)?;

    info!(
        "Wrote {} ({} networks, {} warnings)",
        path.display(),
        env.networks.len(),
        env.diagnostics.len()
    );
    Ok(())
}
