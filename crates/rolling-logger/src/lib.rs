//! Rolling Logger
//!
//! A `tracing` layer for browser frontends. Every event is written to the
//! console (stderr on native targets) and kept in a bounded circular buffer
//! so the most recent lines can be shown in the app (see `recent_lines`).

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Number of lines kept by the global buffer
pub const DEFAULT_CAPACITY: usize = 500;

static BUFFER: OnceLock<Arc<Mutex<RollingBuffer>>> = OnceLock::new();

/// Fixed-size line buffer; the oldest line is dropped when full
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Layer that formats events, echoes them to the console and records them
pub struct RollingLayer {
    app_name: String,
    max_level: Level,
    buffer: Arc<Mutex<RollingBuffer>>,
}

impl RollingLayer {
    pub fn new(app_name: &str, max_level: Level, buffer: Arc<Mutex<RollingBuffer>>) -> Self {
        Self {
            app_name: app_name.to_string(),
            max_level,
            buffer,
        }
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        metadata.level() <= &self.max_level
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        let line = format_line(&self.app_name, *meta.level(), meta.target(), &visitor.finish());
        write_console(*meta.level(), &line);

        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(line);
        }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        format!("{}{}", self.message, self.fields)
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

fn format_line(app_name: &str, level: Level, target: &str, body: &str) -> String {
    format!(
        "[{}] {} {:>5} {}: {}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        app_name,
        level,
        target,
        body
    )
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        Level::INFO => web_sys::console::info_1(&value),
        _ => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the rolling layer as the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logger(app_name: &str, max_level: Level) -> Result<(), String> {
    let buffer = BUFFER
        .get_or_init(|| Arc::new(Mutex::new(RollingBuffer::new(DEFAULT_CAPACITY))))
        .clone();

    tracing_subscriber::registry()
        .with(RollingLayer::new(app_name, max_level, buffer))
        .try_init()
        .map_err(|e| format!("failed to install logger: {}", e))
}

/// Snapshot of the global buffer, oldest first
pub fn recent_lines() -> Vec<String> {
    BUFFER
        .get()
        .and_then(|buffer| buffer.lock().ok().map(|b| b.lines()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_drops_oldest_line() {
        let mut buffer = RollingBuffer::new(2);
        buffer.push("one".to_string());
        buffer.push("two".to_string());
        buffer.push("three".to_string());

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.lines(), vec!["two".to_string(), "three".to_string()]);
    }

    #[test]
    fn test_zero_capacity_keeps_one_line() {
        let mut buffer = RollingBuffer::new(0);
        buffer.push("a".to_string());
        buffer.push("b".to_string());
        assert_eq!(buffer.lines(), vec!["b".to_string()]);
    }

    #[test]
    fn test_layer_records_events_with_fields() {
        let buffer = Arc::new(Mutex::new(RollingBuffer::new(10)));
        let subscriber = tracing_subscriber::registry()
            .with(RollingLayer::new("Test", Level::INFO, buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(task_id = "t1", "moved task");
            tracing::debug!("filtered out");
        });

        let lines = buffer.lock().unwrap().lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Test"));
        assert!(lines[0].contains("moved task"));
        assert!(lines[0].contains("task_id=t1"));
    }

    #[test]
    fn test_recent_lines_reads_global_buffer() {
        init_logger("Global", Level::INFO).unwrap();
        tracing::info!("board loaded");
        tracing::debug!("not kept");

        let lines = recent_lines();
        assert!(lines.iter().any(|l| l.contains("Global") && l.contains("board loaded")));
        assert!(!lines.iter().any(|l| l.contains("not kept")));
    }
}
