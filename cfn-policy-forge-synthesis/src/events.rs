//! Structured warning events emitted during synthesis and merging.
//!
//! Components report recoverable problems through an [`EventSink`] rather
//! than global logger state, so tests can assert on the exact warnings
//! emitted. [`LogSink`] is the production sink and forwards everything to
//! the `log` crate at warn level.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use log::warn;

/// A recoverable problem observed while converting templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthEvent {
    /// The registry has no entry for this resource type; it was skipped.
    TypeNotFound { type_name: String },
    /// The registry entry exists but its schema is not in the expected
    /// shape; the type was skipped.
    MalformedSchema { type_name: String, reason: String },
    /// The registry lookup itself failed (transport-level); the type was
    /// skipped for this run.
    RegistryUnavailable { type_name: String, reason: String },
    /// A policy file under the output root could not be read during
    /// master-policy aggregation.
    UnreadablePolicyFile { path: PathBuf },
    /// A JSON file under the output root does not parse as an IAM policy
    /// document.
    UnrecognizedPolicyFile { path: PathBuf },
    /// Converting one template failed; the batch continues with the rest.
    FileConversionFailed { path: PathBuf, reason: String },
}

impl fmt::Display for SynthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeNotFound { type_name } => {
                write!(f, "Resource type not found in registry, skipping: {type_name}")
            }
            Self::MalformedSchema { type_name, reason } => {
                write!(f, "Malformed schema for {type_name}, skipping: {reason}")
            }
            Self::RegistryUnavailable { type_name, reason } => {
                write!(f, "Registry lookup failed for {type_name}, skipping: {reason}")
            }
            Self::UnreadablePolicyFile { path } => {
                write!(f, "Failed to read policy file: {}", path.display())
            }
            Self::UnrecognizedPolicyFile { path } => {
                write!(f, "Not an IAM policy document: {}", path.display())
            }
            Self::FileConversionFailed { path, reason } => {
                write!(f, "Failed to convert {}: {reason}", path.display())
            }
        }
    }
}

/// Destination for warning events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SynthEvent);
}

/// Forwards every event to the `log` crate at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: SynthEvent) {
        warn!("{event}");
    }
}

/// Records events in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SynthEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<SynthEvent> {
        self.events.lock().expect("event sink lock poisoned").clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: SynthEvent) {
        self.events
            .lock()
            .expect("event sink lock poisoned")
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_preserves_order() {
        let sink = RecordingSink::new();
        sink.emit(SynthEvent::TypeNotFound {
            type_name: "AWS::Fake::First".to_string(),
        });
        sink.emit(SynthEvent::TypeNotFound {
            type_name: "AWS::Fake::Second".to_string(),
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            SynthEvent::TypeNotFound {
                type_name: "AWS::Fake::First".to_string()
            }
        );
    }

    #[test]
    fn test_event_display_names_the_type() {
        let event = SynthEvent::MalformedSchema {
            type_name: "AWS::S3::Bucket".to_string(),
            reason: "schema has no handlers section".to_string(),
        };
        let rendered = event.to_string();
        assert!(rendered.contains("AWS::S3::Bucket"));
        assert!(rendered.contains("handlers"));
    }
}
