//! Session configuration: which style to use, constant overrides, and the
//! logger and metrics a session reports to.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RenderError, Result};
use crate::logging::{FileSink, Logger};
use crate::metrics::RenderMetrics;
use crate::renderer::CommonRenderer;

/// Which renderer to build and how to adjust its constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererOptions {
    pub renderer: String,
    /// Constant field name to replacement value.
    pub overrides: Map<String, Value>,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            renderer: CommonRenderer::NAME.to_string(),
            overrides: Map::new(),
        }
    }
}

impl RendererOptions {
    pub fn new(renderer: impl Into<String>) -> Self {
        Self {
            renderer: renderer.into(),
            ..Self::default()
        }
    }

    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|err| RenderError::InvalidOptions(err.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }
}

#[derive(Clone)]
pub struct RenderConfig {
    /// Optional structured logger used by the session.
    pub logger: Option<Logger>,
    /// Counters shared with whoever else holds the handle.
    pub metrics: Option<Arc<Mutex<RenderMetrics>>>,
    /// Target used when emitting metrics snapshots.
    pub metrics_target: String,
    pub options: RendererOptions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            metrics_target: "block_render::pipeline.metrics".to_string(),
            options: RendererOptions::default(),
        }
    }
}

impl RenderConfig {
    pub fn with_options(options: RendererOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Log JSON lines to `path`, truncating once the file passes `max_bytes`.
    pub fn with_file_logger(self, path: impl AsRef<Path>, max_bytes: u64) -> Result<Self> {
        let sink = FileSink::new(path, max_bytes)?;
        Ok(self.with_logger(Logger::new(sink)))
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(RenderMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<RenderMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn options_parse_from_json() {
        let options = RendererOptions::from_json_str(
            r#"{ "renderer": "zelos", "overrides": { "corner_radius": 6 } }"#,
        )
        .unwrap();
        assert_eq!(options.renderer, "zelos");
        assert_eq!(options.overrides.get("corner_radius"), Some(&json!(6)));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let options = RendererOptions::from_json_str("{}").unwrap();
        assert_eq!(options, RendererOptions::default());
        assert_eq!(options.renderer, "common");
    }

    #[test]
    fn malformed_options_are_rejected() {
        let err = RendererOptions::from_json_str(r#"{ "style": "zelos" }"#).unwrap_err();
        assert!(matches!(err, RenderError::InvalidOptions(_)));
    }

    #[test]
    fn options_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("renderer.json");
        std::fs::write(&path, r#"{ "renderer": "zelos" }"#).unwrap();
        assert_eq!(RendererOptions::from_json_file(&path).unwrap().renderer, "zelos");

        let missing = RendererOptions::from_json_file(dir.path().join("absent.json"));
        assert!(matches!(missing, Err(RenderError::Io(_))));
    }

    #[test]
    fn file_logger_writes_session_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.log");
        let config = RenderConfig::default().with_file_logger(&path, 0).unwrap();
        config
            .logger
            .as_ref()
            .unwrap()
            .log(crate::logging::LogLevel::Info, "block_render::test", "ready")
            .unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"ready\""));

        let unreachable = dir.path().join("missing").join("render.log");
        let err = RenderConfig::default()
            .with_file_logger(unreachable, 0)
            .err()
            .unwrap();
        assert!(matches!(err, RenderError::Logging(_)));
    }

    #[test]
    fn metrics_handle_is_shared() {
        let mut config = RenderConfig::default();
        assert!(config.metrics_handle().is_none());

        config.enable_metrics();
        let handle = config.metrics_handle().unwrap();
        handle.lock().unwrap().record_draw();
        let snapshot = config.metrics.as_ref().unwrap().lock().unwrap().snapshot();
        assert_eq!(snapshot.draws, 1);

        config.disable_metrics();
        assert!(config.metrics_handle().is_none());
    }
}
