//! The sink adapter: level gate, context binding, and the write path

use super::error::{Result, SinkError};
use super::field::{fields_to_map, Field, FieldValue};
use super::field_store::FieldStore;
use super::level::Level;
use super::record::Record;
use crate::sender::LogSender;
use std::sync::Arc;

/// Optional static identity tags applied at construction.
///
/// Both fields default to absent; an empty string is treated the same as
/// absent and omits the corresponding key from every shipped document.
#[derive(Debug, Clone, Default)]
pub struct SinkOptions {
    /// Emitted under the `app` key of every document when set
    pub app_name: Option<String>,
    /// Emitted under the `environment` key of every document when set
    pub environment: Option<String>,
}

/// A log sink that ships each accepted record to a remote collector as a
/// JSON document.
///
/// [`with`](ShipperSink::with) returns a new handle that shares this sink's
/// [`FieldStore`]: context bound through either handle is visible through
/// both, and is consumed by whichever `write` call runs next. Cloning a sink
/// keeps the same sharing relationship; independent stores require
/// independent constructions.
///
/// # Example
///
/// ```no_run
/// use logship::prelude::*;
/// use std::sync::Arc;
///
/// let sender = Arc::new(TcpSender::connect("127.0.0.1:8071")?);
/// let sink = ShipperSink::with_options(
///     sender,
///     Level::Info,
///     SinkOptions {
///         app_name: Some("billing".to_string()),
///         environment: Some("production".to_string()),
///     },
/// );
///
/// let record = Record::new(Level::Warn, "payment retried");
/// if sink.check(&record) {
///     sink.write(&record, &[Field::int("attempt", 2)])?;
/// }
/// sink.sync()?;
/// # Ok::<(), logship::SinkError>(())
/// ```
#[derive(Clone)]
pub struct ShipperSink {
    min_level: Level,
    sender: Arc<dyn LogSender>,
    app_name: String,
    environment: String,
    bound: Arc<FieldStore>,
}

impl ShipperSink {
    /// Create a root sink with a fresh, empty field store
    pub fn new(sender: Arc<dyn LogSender>, min_level: Level) -> Self {
        Self::with_options(sender, min_level, SinkOptions::default())
    }

    /// Create a root sink with static identity tags
    pub fn with_options(
        sender: Arc<dyn LogSender>,
        min_level: Level,
        options: SinkOptions,
    ) -> Self {
        Self {
            min_level,
            sender,
            app_name: options.app_name.unwrap_or_default(),
            environment: options.environment.unwrap_or_default(),
            bound: Arc::new(FieldStore::new()),
        }
    }

    /// Whether records at `level` pass the gate
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    /// Accept/reject decision for one record
    pub fn check(&self, record: &Record) -> bool {
        self.enabled(record.level)
    }

    /// Bind additional context fields for the next write.
    ///
    /// The fields are merged into the shared store (later keys overwrite
    /// earlier ones) and a new handle aliasing the same store is returned.
    /// Both the original and the returned handle observe the binding; the
    /// next `write` through either consumes it.
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> ShipperSink {
        self.bound.bind(fields_to_map(fields));
        self.clone()
    }

    /// Build, serialize, and ship one log document.
    ///
    /// The document merges, in increasing precedence: call-site `fields`,
    /// the synthetic `message`/`level` keys, caller location and identity
    /// tags when present, and finally the bound context fields.
    pub fn write(&self, record: &Record, fields: &[Field]) -> Result<()> {
        let mut document = fields_to_map(fields);
        document.insert(
            "message".to_string(),
            FieldValue::String(record.message.clone()),
        );
        document.insert(
            "level".to_string(),
            FieldValue::String(record.level.as_str().to_string()),
        );

        if let Some(caller) = &record.caller {
            document.insert(
                "caller.file".to_string(),
                FieldValue::String(caller.file.clone()),
            );
            document.insert(
                "caller.function".to_string(),
                FieldValue::String(format!("{}:{}", caller.function, caller.line)),
            );
        }

        if !self.app_name.is_empty() {
            document.insert("app".to_string(), FieldValue::String(self.app_name.clone()));
        }

        if !self.environment.is_empty() {
            document.insert(
                "environment".to_string(),
                FieldValue::String(self.environment.clone()),
            );
        }

        // Bound context wins over call-site fields at the same key. The
        // store is drained on every write attempt, delivered or not, and
        // the lock is released before the sender is called.
        for (key, value) in self.bound.take() {
            document.insert(key, value);
        }

        let payload = serde_json::to_vec(&document)?;
        self.sender.send(&payload).map_err(SinkError::delivery)
    }

    /// Flush outstanding deliveries in the sender
    pub fn sync(&self) -> Result<()> {
        self.sender.sync().map_err(SinkError::sync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;

    #[derive(Default)]
    struct RecordingSender {
        payloads: Mutex<Vec<Vec<u8>>>,
        synced: Mutex<usize>,
    }

    impl RecordingSender {
        fn documents(&self) -> Vec<serde_json::Value> {
            self.payloads
                .lock()
                .iter()
                .map(|bytes| serde_json::from_slice(bytes).expect("payload is JSON"))
                .collect()
        }
    }

    impl LogSender for RecordingSender {
        fn send(&self, payload: &[u8]) -> io::Result<()> {
            self.payloads.lock().push(payload.to_vec());
            Ok(())
        }

        fn sync(&self) -> io::Result<()> {
            *self.synced.lock() += 1;
            Ok(())
        }

        fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }
    }

    fn recording_sink(min_level: Level) -> (Arc<RecordingSender>, ShipperSink) {
        let sender = Arc::new(RecordingSender::default());
        let sink = ShipperSink::new(Arc::clone(&sender) as Arc<dyn LogSender>, min_level);
        (sender, sink)
    }

    #[test]
    fn test_check_gates_on_level() {
        let (_, sink) = recording_sink(Level::Error);

        assert!(!sink.check(&Record::new(Level::Debug, "quiet")));
        assert!(!sink.check(&Record::new(Level::Warn, "quiet")));
        assert!(sink.check(&Record::new(Level::Error, "loud")));
        assert!(sink.check(&Record::new(Level::Panic, "loud")));
    }

    #[test]
    fn test_write_inserts_synthetic_keys() {
        let (sender, sink) = recording_sink(Level::Debug);

        sink.write(&Record::new(Level::Warn, "disk almost full"), &[])
            .unwrap();

        let docs = sender.documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["message"], "disk almost full");
        assert_eq!(docs[0]["level"], "warn");
        assert!(docs[0].get("app").is_none());
        assert!(docs[0].get("environment").is_none());
    }

    #[test]
    fn test_write_includes_caller_when_present() {
        let (sender, sink) = recording_sink(Level::Debug);

        let record = Record::new(Level::Info, "served").with_caller(
            "src/server.rs",
            "serve_request",
            118,
        );
        sink.write(&record, &[]).unwrap();

        let docs = sender.documents();
        assert_eq!(docs[0]["caller.file"], "src/server.rs");
        assert_eq!(docs[0]["caller.function"], "serve_request:118");
    }

    #[test]
    fn test_identity_tags_emitted_only_when_nonempty() {
        let sender = Arc::new(RecordingSender::default());
        let sink = ShipperSink::with_options(
            Arc::clone(&sender) as Arc<dyn LogSender>,
            Level::Debug,
            SinkOptions {
                app_name: Some("billing".to_string()),
                environment: Some(String::new()),
            },
        );

        sink.write(&Record::new(Level::Info, "up"), &[]).unwrap();

        let docs = sender.documents();
        assert_eq!(docs[0]["app"], "billing");
        assert!(docs[0].get("environment").is_none());
    }

    #[test]
    fn test_with_aliases_the_store() {
        let (sender, sink) = recording_sink(Level::Debug);

        let derived = sink.with(&[Field::string("request_id", "abc-123")]);

        // the ORIGINAL handle sees the binding too
        sink.write(&Record::new(Level::Info, "first"), &[]).unwrap();
        derived
            .write(&Record::new(Level::Info, "second"), &[])
            .unwrap();

        let docs = sender.documents();
        assert_eq!(docs[0]["request_id"], "abc-123");
        assert!(docs[1].get("request_id").is_none());
    }

    #[test]
    fn test_bound_context_beats_call_site_fields() {
        let (sender, sink) = recording_sink(Level::Debug);

        let sink = sink.with(&[Field::string("x", "bound")]);
        sink.write(
            &Record::new(Level::Info, "collision"),
            &[Field::string("x", "adhoc")],
        )
        .unwrap();

        assert_eq!(sender.documents()[0]["x"], "bound");
    }

    #[test]
    fn test_synthetic_keys_beat_call_site_fields() {
        let (sender, sink) = recording_sink(Level::Debug);

        sink.write(
            &Record::new(Level::Info, "real message"),
            &[
                Field::string("message", "spoofed"),
                Field::string("level", "spoofed"),
            ],
        )
        .unwrap();

        let docs = sender.documents();
        assert_eq!(docs[0]["message"], "real message");
        assert_eq!(docs[0]["level"], "info");
    }

    #[test]
    fn test_independent_roots_have_independent_stores() {
        let (sender_a, sink_a) = recording_sink(Level::Debug);
        let (sender_b, sink_b) = recording_sink(Level::Debug);

        let _ = sink_a.with(&[Field::string("only_a", "yes")]);

        sink_b.write(&Record::new(Level::Info, "b"), &[]).unwrap();
        sink_a.write(&Record::new(Level::Info, "a"), &[]).unwrap();

        assert!(sender_b.documents()[0].get("only_a").is_none());
        assert_eq!(sender_a.documents()[0]["only_a"], "yes");
    }

    #[test]
    fn test_sync_delegates_to_sender() {
        let (sender, sink) = recording_sink(Level::Debug);
        sink.sync().unwrap();
        assert_eq!(*sender.synced.lock(), 1);
    }
}
