//! Level file loading.

use std::path::Path;

use tracing::debug;

use crate::config::EngineConfig;
use crate::core::{LevelError, LevelTemplate};
use crate::session::Session;

/// Read and parse a level asset from disk.
pub async fn load_level(path: impl AsRef<Path>) -> Result<LevelTemplate, LevelError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let template = LevelTemplate::from_json(&text)?;
    debug!(
        path = %path.display(),
        rows = template.rows(),
        cols = template.cols(),
        "level loaded"
    );
    Ok(template)
}

/// Load a level and start a session on it.
pub async fn start_session(
    path: impl AsRef<Path>,
    config: EngineConfig,
) -> Result<Session, LevelError> {
    let template = load_level(path).await?;
    Session::new(template, config)
}
