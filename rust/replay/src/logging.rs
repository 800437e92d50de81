use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

pub const DEFAULT_FILTER: &str = "info,handreel_replay=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_filter` when set. Fails if a global
/// subscriber is already installed.
pub fn init_logging(default_filter: &str, format: LogFormat) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let (plain, json) = match format {
        LogFormat::Plain => (
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .try_init()
}

/// A captured event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Collects events in memory so tests can assert on what was logged.
#[derive(Debug, Clone, Default)]
pub struct TestLogSubscriber {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn into_layer<S>(self) -> TestLayer<S>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        TestLayer {
            subscriber: self,
            _phantom: PhantomData,
        }
    }

    /// A registry that reports to this collector, for `with_default`.
    pub fn registry(&self) -> impl tracing::Subscriber + Send + Sync {
        Registry::default().with(self.clone().into_layer::<Registry>())
    }
}

pub struct TestLayer<S> {
    subscriber: TestLogSubscriber,
    _phantom: PhantomData<S>,
}

impl<S> Layer<S> for TestLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.subscriber
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                level: *metadata.level(),
                target: metadata.target().to_string(),
                message: visitor.message.unwrap_or_default(),
                fields: visitor.fields,
            });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ReplayEngine;
    use handreel_engine::sample::random_hand;
    use handreel_engine::steps::generate_steps;

    #[test]
    fn captures_completion_at_info() {
        let logs = TestLogSubscriber::new();
        tracing::subscriber::with_default(logs.registry(), || {
            let mut engine = ReplayEngine::new(generate_steps(&random_hand(1)));
            engine.seek(1.0).unwrap();
        });

        let entries = logs.entries();
        let done = entries
            .iter()
            .find(|e| e.message == "replay complete")
            .expect("completion logged");
        assert_eq!(done.level, Level::INFO);
        assert!(done.target.starts_with("handreel_replay"));
        assert!(done.field("len").is_some());
    }

    #[test]
    fn stale_fire_logs_at_trace() {
        let logs = TestLogSubscriber::new();
        tracing::subscriber::with_default(logs.registry(), || {
            let mut engine = ReplayEngine::new(generate_steps(&random_hand(2)));
            let first = engine.play().unwrap();
            engine.pause().unwrap();
            assert!(engine.fire(first.ticket).is_none());
        });

        let stale = logs
            .entries()
            .into_iter()
            .find(|e| e.message == "ignoring stale replay timer")
            .expect("stale fire logged");
        assert_eq!(stale.level, Level::TRACE);
        assert_eq!(stale.field("ticket"), Some("0"));
    }

    #[test]
    fn clear_drops_captured_entries() {
        let logs = TestLogSubscriber::new();
        tracing::subscriber::with_default(logs.registry(), || {
            tracing::warn!("first");
        });
        assert_eq!(logs.messages(), vec!["first".to_string()]);
        logs.clear();
        assert!(logs.entries().is_empty());
    }
}
