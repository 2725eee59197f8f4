use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::error::{RenderError, Result};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::renderer::{CommonRenderer, Renderer};
use crate::zelos::ZelosRenderer;

const LOG_TARGET: &str = "block_render::registry";

/// Builds an uninitialized renderer given the name it is registered under.
pub type RendererConstructor = Arc<dyn Fn(&str) -> Box<dyn Renderer> + Send + Sync>;

/// Style name to renderer constructor.
///
/// Hosts usually build one at startup and only read it afterwards. Tests
/// build their own so registrations never leak between them.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    constructors: HashMap<String, RendererConstructor>,
    logger: Option<Logger>,
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the `"common"` and `"zelos"` styles.
    pub fn with_builtin_styles() -> Self {
        let mut registry = Self::new();
        registry.register(CommonRenderer::NAME, |name| Box::new(CommonRenderer::new(name)));
        registry.register(ZelosRenderer::NAME, |name| Box::new(ZelosRenderer::new(name)));
        registry
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Register `constructor` under `name`. A second registration under the
    /// same name replaces the first; returns true when that happened.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> bool
    where
        F: Fn(&str) -> Box<dyn Renderer> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self
            .constructors
            .insert(name.clone(), Arc::new(constructor))
            .is_some();
        if replaced {
            self.log(LogLevel::Warn, "renderer_replaced", &name);
        } else {
            self.log(LogLevel::Debug, "renderer_registered", &name);
        }
        replaced
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        let removed = self.constructors.remove(name).is_some();
        if removed {
            self.log(LogLevel::Debug, "renderer_unregistered", name);
        }
        removed
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.constructors.keys().cloned().collect();
        names.sort();
        names
    }

    /// Build the renderer registered as `name` and initialize its constants
    /// with `overrides` applied.
    pub fn init(&self, name: &str, overrides: &Map<String, Value>) -> Result<Box<dyn Renderer>> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| RenderError::UnknownRenderer(name.to_string()))?;
        let mut renderer = constructor(name);
        renderer.init(overrides)?;
        if let Some(logger) = &self.logger {
            let event = event_with_fields(
                LogLevel::Info,
                LOG_TARGET,
                "renderer_initialized",
                [
                    json_kv("renderer", json!(name)),
                    json_kv("overrides", json!(overrides.len())),
                ],
            );
            let _ = logger.log_event(event);
        }
        Ok(renderer)
    }

    fn log(&self, level: LogLevel, message: &str, name: &str) {
        if let Some(logger) = &self.logger {
            let event =
                event_with_fields(level, LOG_TARGET, message, [json_kv("renderer", json!(name))]);
            let _ = logger.log_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;

    #[test]
    fn builtin_styles_are_registered() {
        let registry = RendererRegistry::with_builtin_styles();
        assert_eq!(registry.names(), vec!["common", "zelos"]);

        let renderer = registry.init("zelos", &Map::new()).unwrap();
        assert_eq!(renderer.name(), "zelos");
        assert_eq!(renderer.constants().corner_radius, 4.0);
    }

    #[test]
    fn unknown_names_are_errors() {
        let registry = RendererRegistry::new();
        let Err(err) = registry.init("geras", &Map::new()) else {
            panic!("lookup should fail");
        };
        assert!(matches!(err, RenderError::UnknownRenderer(name) if name == "geras"));
    }

    #[test]
    fn registering_twice_keeps_the_last_constructor() {
        let sink = MemorySink::new();
        let mut registry = RendererRegistry::new().with_logger(Logger::new(sink.clone()));
        assert!(!registry.register("custom", |name| Box::new(CommonRenderer::new(name))));
        assert!(registry.register("custom", |name| Box::new(ZelosRenderer::new(name))));
        assert_eq!(registry.names(), vec!["custom"]);

        let renderer = registry.init("custom", &Map::new()).unwrap();
        assert_eq!(renderer.constants().corner_radius, 4.0);

        let warnings: Vec<_> = sink
            .events()
            .into_iter()
            .filter(|event| event.level == LogLevel::Warn)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "renderer_replaced");
        assert_eq!(warnings[0].field("renderer"), Some(&json!("custom")));
    }

    #[test]
    fn bad_overrides_fail_init() {
        let registry = RendererRegistry::with_builtin_styles();
        let overrides = json!({ "corner_radius": "round" });
        let Err(err) = registry.init("common", overrides.as_object().unwrap()) else {
            panic!("overrides should be rejected");
        };
        assert!(matches!(err, RenderError::InvalidOverrides(_)));
    }

    #[test]
    fn registries_are_isolated() {
        let mut first = RendererRegistry::new();
        first.register("only_here", |name| Box::new(CommonRenderer::new(name)));
        let second = RendererRegistry::new();
        assert!(first.is_registered("only_here"));
        assert!(!second.is_registered("only_here"));
        assert!(first.unregister("only_here"));
        assert!(!first.unregister("only_here"));
    }
}
