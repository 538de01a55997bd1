//! Diagnostic sinks.
//!
//! Diagnostics are reported from the loader, the runner loop, and from
//! launch completion tasks running on other threads, so sinks are
//! `Send + Sync`.

use crate::error::Diagnostic;
use crate::output;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

pub trait Reporter: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Stores diagnostics for later inspection (JSON output, tests).
#[derive(Default)]
pub struct Collector {
    items: Mutex<Vec<Diagnostic>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, in arrival order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.items.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl Reporter for Collector {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::debug!("[report] collected: {}", diagnostic);
        self.items.lock().push(diagnostic);
    }
}

/// Prints each diagnostic as one line as soon as it arrives (stderr by
/// default). The `tracing` event stays at debug so the default filter does
/// not echo the same message.
pub struct ConsoleReporter {
    color: bool,
    count: AtomicUsize,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleReporter {
    pub fn new(color: bool) -> Self {
        Self::with_writer(color, Box::new(std::io::stderr()))
    }

    pub fn with_writer(color: bool, out: Box<dyn Write + Send>) -> Self {
        Self {
            color,
            count: AtomicUsize::new(0),
            out: Mutex::new(out),
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::debug!("[report] {}", diagnostic);
        self.count.fetch_add(1, Ordering::SeqCst);
        let line = output::render_diagnostic(&diagnostic, self.color);
        let _ = writeln!(self.out.lock(), "{}", line);
    }
}
