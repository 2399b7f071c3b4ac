//! Captures `tracing` events as structured envelopes so a front end can show
//! them in-process instead of writing to the terminal it is drawing on.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

#[derive(Debug, Clone, Serialize)]
pub struct LogEnvelope {
    pub timestamp_ms: u64,
    pub level: String,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "map_is_empty")]
    pub fields: Map<String, Value>,
}

impl LogEnvelope {
    /// One-line rendering: `LEVEL message key=value ...`.
    pub fn summary_line(&self) -> String {
        let mut line = format!("{:<5} {}", self.level, self.message);
        for (key, value) in &self.fields {
            match value {
                Value::String(text) => line.push_str(&format!(" {key}={text}")),
                other => line.push_str(&format!(" {key}={other}")),
            }
        }
        line
    }
}

/// Forwards every event it sees to a channel as a [`LogEnvelope`].
#[derive(Clone)]
pub struct LogForwardLayer {
    sender: Sender<LogEnvelope>,
}

/// Layer plus the receiving end of its channel.
pub fn log_channel() -> (LogForwardLayer, Receiver<LogEnvelope>) {
    let (sender, receiver) = unbounded::<LogEnvelope>();
    (LogForwardLayer::new(sender), receiver)
}

impl LogForwardLayer {
    pub fn new(sender: Sender<LogEnvelope>) -> Self {
        Self { sender }
    }
}

impl<S> Layer<S> for LogForwardLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut parsed = EventFields::default();
        event.record(&mut parsed);
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let message = parsed
            .message
            .unwrap_or_else(|| metadata.target().to_string());
        let envelope = LogEnvelope {
            timestamp_ms,
            level: metadata.level().to_string(),
            target: metadata.target().to_string(),
            message,
            fields: parsed.fields,
        };
        let _ = self.sender.send(envelope);
    }
}

/// Splits an event into its message and the remaining structured fields.
#[derive(Default)]
struct EventFields {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl EventFields {
    fn insert(&mut self, field: &Field, value: Value) {
        match (field.name(), value) {
            ("message", Value::String(text)) => self.message = Some(text),
            ("message", other) => self.message = Some(other.to_string()),
            (name, value) => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for EventFields {
    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.into());
    }

    /// Non-finite values have no JSON number form and are kept as text.
    fn record_f64(&mut self, field: &Field, value: f64) {
        let value = Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(value.to_string()));
        self.insert(field, value);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{value:?}")));
    }
}

fn map_is_empty(map: &Map<String, Value>) -> bool {
    map.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn forwards_message_and_fields() {
        let (layer, receiver) = log_channel();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(rows = 42u64, path = "data.csv", "dataset.loaded");
        });

        let envelope = receiver.try_recv().expect("event forwarded");
        assert_eq!(envelope.level, "INFO");
        assert_eq!(envelope.message, "dataset.loaded");
        assert_eq!(envelope.fields.get("rows"), Some(&Value::from(42u64)));
        assert_eq!(
            envelope.summary_line(),
            "INFO  dataset.loaded path=data.csv rows=42"
        );
    }

    #[test]
    fn debug_and_non_finite_fields_are_text() {
        let (layer, receiver) = log_channel();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(ratio = f64::NAN, views = ?["map", "table"], "dashboard.recomputed");
        });

        let envelope = receiver.try_recv().expect("event forwarded");
        assert_eq!(envelope.fields.get("ratio"), Some(&Value::from("NaN")));
        assert_eq!(
            envelope.fields.get("views"),
            Some(&Value::from("[\"map\", \"table\"]"))
        );
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        let (layer, receiver) = log_channel();
        drop(receiver);
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("nobody is listening");
        });
    }
}
