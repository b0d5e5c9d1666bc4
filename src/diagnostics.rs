//! Diagnostics Module
//!
//! Optional sink notified when a provider operation fails. Notification is
//! a side observation; the error is still returned to the caller.

use tracing::error;

/// Receives error-level diagnostics as `(message, context)`.
pub trait DiagnosticSink: Send + Sync {
    fn error(&self, message: &str, context: &[&str]);
}

/// Forwards diagnostics to `tracing::error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn error(&self, message: &str, context: &[&str]) {
        error!(context = ?context, "{}", message);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::DiagnosticSink;
    use std::sync::Mutex;

    /// Collects diagnostics for assertions.
    #[derive(Default)]
    pub struct CollectingSink {
        pub entries: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl DiagnosticSink for CollectingSink {
        fn error(&self, message: &str, context: &[&str]) {
            self.entries.lock().unwrap().push((
                message.to_string(),
                context.iter().map(|c| c.to_string()).collect(),
            ));
        }
    }
}
