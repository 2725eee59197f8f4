use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated across render passes.
#[derive(Debug, Default, Clone)]
pub struct RenderMetrics {
    passes: u64,
    rows: u64,
    spacer_rows: u64,
    elements: u64,
    fields: u64,
    draws: u64,
}

impl RenderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one measurement pass and the size of the tree it produced.
    pub fn record_pass(&mut self, rows: usize, spacer_rows: usize, elements: usize, fields: usize) {
        self.passes = self.passes.saturating_add(1);
        self.rows = self.rows.saturating_add(rows as u64);
        self.spacer_rows = self.spacer_rows.saturating_add(spacer_rows as u64);
        self.elements = self.elements.saturating_add(elements as u64);
        self.fields = self.fields.saturating_add(fields as u64);
    }

    pub fn record_draw(&mut self) {
        self.draws = self.draws.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            passes: self.passes,
            rows: self.rows,
            spacer_rows: self.spacer_rows,
            elements: self.elements,
            fields: self.fields,
            draws: self.draws,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub passes: u64,
    pub rows: u64,
    pub spacer_rows: u64,
    pub elements: u64,
    pub fields: u64,
    pub draws: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("passes".to_string(), json!(self.passes));
        map.insert("rows".to_string(), json!(self.rows));
        map.insert("spacer_rows".to_string(), json!(self.spacer_rows));
        map.insert("elements".to_string(), json!(self.elements));
        map.insert("fields".to_string(), json!(self.fields));
        map.insert("draws".to_string(), json!(self.draws));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "render_metrics", self.as_fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_accumulate_into_snapshot() {
        let mut metrics = RenderMetrics::new();
        metrics.record_pass(5, 2, 14, 3);
        metrics.record_pass(3, 1, 6, 0);
        metrics.record_draw();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.passes, 2);
        assert_eq!(snapshot.rows, 8);
        assert_eq!(snapshot.spacer_rows, 3);
        assert_eq!(snapshot.elements, 20);
        assert_eq!(snapshot.fields, 3);
        assert_eq!(snapshot.draws, 1);

        let event = snapshot.to_log_event("block_render::pipeline.metrics");
        assert_eq!(event.message, "render_metrics");
        assert_eq!(event.field("rows"), Some(&json!(8)));
    }
}
