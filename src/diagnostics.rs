//! Warning collaborator and recoverable input errors.
//!
//! The resolution utilities never log on their own. Anything that is
//! recovered locally (a missing language collection, a section without an
//! id, an unresolvable image) is reported through a [`Warnings`]
//! implementation handed in by the caller, so the utilities stay pure and
//! tests can assert on exactly what was reported.
//!
//! - [`TracingWarnings`] forwards to `tracing::warn!` and is what the CLI uses.
//! - [`RecordingWarnings`] keeps the messages in memory; `check` prints them
//!   as part of its report and the test suite inspects them.

use std::cell::RefCell;
use thiserror::Error;

/// Sink for recoverable problems.
pub trait Warnings {
    fn warn(&self, message: &str);
}

/// Forwards every warning to the global `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWarnings;

impl Warnings for TracingWarnings {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Collects warnings in insertion order.
#[derive(Debug, Default)]
pub struct RecordingWarnings {
    messages: RefCell<Vec<String>>,
}

impl RecordingWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages.into_inner()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl Warnings for RecordingWarnings {
    fn warn(&self, message: &str) {
        tracing::debug!(warning = message, "recorded");
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// Input a utility needed was missing or unusable.
///
/// Never fatal: every producer of this error substitutes a documented
/// default and reports the error through [`Warnings`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} collection not found")]
    MissingCollection(&'static str),
    #[error("{0} entry not found")]
    MissingEntry(String),
    #[error("image path is empty")]
    EmptyImagePath,
}
