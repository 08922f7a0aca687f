use std::{
    fmt,
    sync::{Arc, Mutex},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{Layer, Registry, layer::Context, layer::SubscriberExt};
use tyers::{Error, Sentinel, errorf};
use tyers_tracing::{TraceErrExt, TracingOptions, record};

static NOT_FOUND: Sentinel = Sentinel::new("not found");

#[derive(Debug, Default)]
struct Captured {
    level: Option<Level>,
    fields: Vec<(String, String)>,
}

impl Captured {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

struct FieldVisitor<'a>(&'a mut Vec<(String, String)>);

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut captured = Captured {
            level: Some(*event.metadata().level()),
            ..Captured::default()
        };
        event.record(&mut FieldVisitor(&mut captured.fields));
        self.events.lock().unwrap().push(captured);
    }
}

fn capture(f: impl FnOnce()) -> Vec<Captured> {
    let layer = CaptureLayer::default();
    let events = layer.events.clone();
    tracing::subscriber::with_default(Registry::default().with(layer), f);
    let mut events = events.lock().unwrap();
    std::mem::take(&mut *events)
}

#[derive(Debug, thiserror::Error)]
#[error("query failed")]
struct QueryFailed(#[source] Error);

#[test]
fn ok_results_emit_nothing() {
    let events = capture(|| {
        let result: tyers::Result<u32> = Ok(1);
        assert_eq!(result.trace_err().unwrap(), 1);
    });
    assert!(events.is_empty());
}

#[test]
fn errors_emit_message_and_category() {
    let events = capture(|| {
        let result: tyers::Result<()> = Err(tyers::new(&NOT_FOUND, "user 'bob' not found"));
        let err = result.trace_err().unwrap_err();
        assert!(err.is(&NOT_FOUND));
    });

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.level, Some(Level::ERROR));
    assert_eq!(event.field("error.message"), Some("user 'bob' not found"));
    assert_eq!(event.field("error.category"), Some("not found"));
}

#[test]
fn uncategorised_errors_omit_the_category() {
    let events = capture(|| {
        Error::msg("plain failure").trace_err_at(Level::WARN);
    });

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Some(Level::WARN));
    assert_eq!(events[0].field("error.message"), Some("plain failure"));
    assert_eq!(events[0].field("error.category"), None);
}

#[test]
fn optional_fields_are_off_by_default() {
    let storage = Error::msg("storage");
    let events = capture(|| {
        record(
            &tyers::new(&storage, "disk full"),
            Level::INFO,
            TracingOptions::default(),
        );
    });

    assert_eq!(events[0].field("error.categories"), None);
    assert_eq!(events[0].field("error.sources"), None);
}

#[test]
fn category_ancestry_is_recorded_on_request() {
    let storage = Error::msg("storage");
    let missing = tyers::new(&storage, "missing");
    let err = tyers::new(&missing, "object 12 is missing");

    let events = capture(|| {
        record(
            &err,
            Level::DEBUG,
            TracingOptions {
                categories: true,
                sources: false,
            },
        );
    });

    assert_eq!(events[0].level, Some(Level::DEBUG));
    assert_eq!(events[0].field("error.category"), Some("missing"));
    assert_eq!(
        events[0].field("error.categories"),
        Some("missing > storage")
    );
    assert_eq!(events[0].field("error.sources"), None);
}

#[test]
fn source_chain_is_recorded_on_request() {
    let reset = Error::msg("connection reset");
    let query = Error::new(QueryFailed(reset));
    let err = errorf!(&NOT_FOUND, "load user: {}", wrap(query));

    let events = capture(|| {
        record(
            &err,
            Level::ERROR,
            TracingOptions {
                categories: false,
                sources: true,
            },
        );
    });

    assert_eq!(events[0].field("error.message"), Some("load user: query failed"));
    assert_eq!(
        events[0].field("error.sources"),
        Some("query failed: connection reset")
    );
}

#[test]
fn options_parse_known_flags_only() {
    assert_eq!(TracingOptions::parse(""), TracingOptions::default());
    assert_eq!(
        TracingOptions::parse("categories,unknown"),
        TracingOptions {
            categories: true,
            sources: false,
        }
    );
    assert_eq!(
        TracingOptions::parse(" Sources "),
        TracingOptions {
            categories: false,
            sources: true,
        }
    );
}
