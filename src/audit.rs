//! Audit trail: best-effort recording of state changes off the hot path.
//!
//! Entries travel over a bounded channel to a worker thread that owns the
//! sink. Recording never blocks and never fails the operation that produced
//! the entry; when the channel is full the entry is dropped with a warning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io;
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread;

/// In-flight entries beyond this are dropped rather than blocking callers.
const CHANNEL_CAPACITY: usize = 256;

/// One recorded state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Who triggered the change (a referee name, "simulator", ...).
    pub actor: String,
    /// What happened ("result_recorded", "tournament_started", ...).
    pub action: String,
    /// The entity concerned, e.g. "game <id>".
    pub entity: String,
    pub before: Option<Value>,
    pub after: Option<Value>,
    pub at: DateTime<Utc>,
}

/// Destination for audit entries. Appends may fail; failures are logged by
/// the worker and never reach the caller.
pub trait AuditSink: Send {
    fn append(&mut self, entry: AuditEntry) -> io::Result<()>;
}

/// Writes entries as JSON lines through the `log` facade, target `audit`.
pub struct LogSink;

impl AuditSink for LogSink {
    fn append(&mut self, entry: AuditEntry) -> io::Result<()> {
        match serde_json::to_string(&entry) {
            Ok(line) => {
                log::info!(target: "audit", "{}", line);
                Ok(())
            }
            Err(e) => Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        }
    }
}

/// Collects entries in memory; for tests and the simulator.
#[derive(Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl AuditSink for MemorySink {
    fn append(&mut self, entry: AuditEntry) -> io::Result<()> {
        match self.entries.lock() {
            Ok(mut guard) => {
                guard.push(entry);
                Ok(())
            }
            Err(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                "audit sink lock poisoned",
            )),
        }
    }
}

/// Hands entries to a worker thread over a bounded channel.
pub struct AuditRecorder {
    tx: SyncSender<AuditEntry>,
}

impl AuditRecorder {
    /// Start the worker thread draining into `sink`. The worker exits when
    /// the recorder is dropped and the channel has drained.
    pub fn spawn(mut sink: Box<dyn AuditSink>) -> Self {
        let (tx, rx) = mpsc::sync_channel(CHANNEL_CAPACITY);
        thread::spawn(move || {
            for entry in rx {
                if let Err(e) = sink.append(entry) {
                    log::warn!("audit sink append failed: {}", e);
                }
            }
        });
        Self { tx }
    }

    /// Queue one entry, stamped with the current time. Never blocks and never
    /// fails the caller.
    pub fn record(
        &self,
        actor: &str,
        action: &str,
        entity: String,
        before: Option<Value>,
        after: Option<Value>,
    ) {
        let entry = AuditEntry {
            actor: actor.to_string(),
            action: action.to_string(),
            entity,
            before,
            after,
            at: Utc::now(),
        };
        match self.tx.try_send(entry) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                log::warn!("audit channel full, entry dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                log::warn!("audit worker gone, entry dropped");
            }
        }
    }
}
