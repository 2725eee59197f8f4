//! Instrumented render loop: one renderer, one config, many blocks.

use serde_json::json;

use crate::config::RenderConfig;
use crate::draw::DrawOutput;
use crate::error::Result;
use crate::logging::{LogLevel, event_with_fields, json_kv};
use crate::model::BlockModel;
use crate::path_object::PathObject;
use crate::registry::RendererRegistry;
use crate::renderer::Renderer;

const LOG_TARGET: &str = "block_render::pipeline";

/// Renders blocks with one initialized renderer, logging each pass and
/// feeding the configured metrics.
pub struct RenderSession {
    renderer: Box<dyn Renderer>,
    config: RenderConfig,
}

impl RenderSession {
    /// Build the renderer named in `config.options` from `registry`.
    pub fn new(registry: &RendererRegistry, config: RenderConfig) -> Result<Self> {
        let options = &config.options;
        let renderer = registry.init(&options.renderer, &options.overrides)?;
        Ok(Self::with_renderer(renderer, config))
    }

    /// Wrap an already initialized renderer.
    pub fn with_renderer(renderer: Box<dyn Renderer>, config: RenderConfig) -> Self {
        Self { renderer, config }
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Measure and draw `block`, then paint the result onto `path_object`.
    pub fn render(&self, block: &dyn BlockModel, path_object: &mut dyn PathObject) -> DrawOutput {
        let renderer = self.renderer.as_ref();
        let info = renderer.make_render_info(block);
        let rows = info.rows.len();
        let spacer_rows = info.spacer_row_count();
        let elements = info.element_count();
        let fields = info.field_count();

        let output = renderer.make_drawer(&info).draw();
        path_object.apply_draw(&output);

        if let Some(metrics) = &self.config.metrics {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_pass(rows, spacer_rows, elements, fields);
                guard.record_draw();
            }
        }
        if let Some(logger) = &self.config.logger {
            if logger.enabled(LogLevel::Debug) {
                let event = event_with_fields(
                    LogLevel::Debug,
                    LOG_TARGET,
                    "block_rendered",
                    [
                        json_kv("renderer", json!(renderer.name())),
                        json_kv("block", json!(block.id())),
                        json_kv("rows", json!(rows)),
                        json_kv("width", json!(output.width)),
                        json_kv("height", json!(output.height)),
                    ],
                );
                let _ = logger.log_event(event);
            }
        }
        output
    }

    /// Emit the current metrics snapshot to the logger.
    pub fn flush_metrics(&self) {
        let (Some(logger), Some(metrics)) = (&self.config.logger, &self.config.metrics) else {
            return;
        };
        let snapshot = match metrics.lock() {
            Ok(guard) => guard.snapshot(),
            Err(_) => return,
        };
        let _ = logger.log_event(snapshot.to_log_event(&self.config.metrics_target));
    }
}
