//! Console log of demo operations

use super::forms::FormError;
use serde_json::Value;

/// Oldest entries are dropped once the log grows past this
pub const MAX_CONSOLE_ENTRIES: usize = 500;

/// How an operation turned out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Plain observation, e.g. a value snapshot
    Info,
    Allowed,
    Rejected,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Info => "info",
            Outcome::Allowed => "ok",
            Outcome::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEntry {
    pub outcome: Outcome,
    pub message: String,
}

/// Ordered log of what the demo did.
///
/// Every entry is also emitted through `tracing`. While `echo` is set entries
/// log at info/warn; otherwise at debug, so an interactive session does not
/// write over the terminal UI.
#[derive(Debug, Default)]
pub struct Console {
    entries: Vec<ConsoleEntry>,
    /// Entries ever pushed, including dropped ones
    recorded: usize,
    echo: bool,
}

impl Console {
    pub fn new(echo: bool) -> Self {
        Self {
            entries: Vec::new(),
            recorded: 0,
            echo,
        }
    }

    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    pub fn entries(&self) -> &[ConsoleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries pushed so far; keeps counting after the log
    /// starts dropping old entries
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Outcome::Info, message.into());
    }

    /// Log a value snapshot as compact JSON
    pub fn snapshot(&mut self, label: &str, value: &Value) {
        self.push(Outcome::Info, format!("{label} = {value}"));
    }

    /// Log the outcome of a form operation and hand back its result
    pub fn record<T>(
        &mut self,
        action: impl AsRef<str>,
        result: Result<T, FormError>,
    ) -> Option<T> {
        let action = action.as_ref();
        match result {
            Ok(value) => {
                self.push(Outcome::Allowed, action.to_string());
                Some(value)
            }
            Err(err) => {
                self.push(Outcome::Rejected, format!("{action}: {} ({err})", err.kind()));
                None
            }
        }
    }

    fn push(&mut self, outcome: Outcome, message: String) {
        match (self.echo, outcome) {
            (true, Outcome::Rejected) => tracing::warn!("[{}] {message}", outcome.label()),
            (true, _) => tracing::info!("[{}] {message}", outcome.label()),
            (false, _) => tracing::debug!("[{}] {message}", outcome.label()),
        }
        self.entries.push(ConsoleEntry { outcome, message });
        self.recorded += 1;
        if self.entries.len() > MAX_CONSOLE_ENTRIES {
            let excess = self.entries.len() - MAX_CONSOLE_ENTRIES;
            self.entries.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FormResult;
    use serde_json::json;

    #[test]
    fn test_record_success_returns_value() {
        let mut console = Console::new(false);
        let value = console.record("add", Ok::<_, FormError>(7));
        assert_eq!(value, Some(7));
        assert_eq!(console.entries()[0].outcome, Outcome::Allowed);
        assert_eq!(console.entries()[0].message, "add");
    }

    #[test]
    fn test_record_error_is_rejected() {
        let mut console = Console::new(false);
        let result: FormResult<()> = Err(FormError::IllegalRemoval {
            name: "email".to_string(),
        });
        assert!(console.record("remove email", result).is_none());
        let entry = &console.entries()[0];
        assert_eq!(entry.outcome, Outcome::Rejected);
        assert_eq!(
            entry.message,
            "remove email: IllegalRemoval (Cannot remove required control 'email')"
        );
    }

    #[test]
    fn test_snapshot_uses_compact_json() {
        let mut console = Console::new(false);
        console.snapshot("login", &json!({"email": ""}));
        assert_eq!(console.entries()[0].message, r#"login = {"email":""}"#);
        assert_eq!(console.len(), 1);
    }

    #[test]
    fn test_oldest_entries_dropped_past_limit() {
        let mut console = Console::new(false);
        for i in 0..MAX_CONSOLE_ENTRIES + 3 {
            console.info(format!("line {i}"));
        }
        assert_eq!(console.len(), MAX_CONSOLE_ENTRIES);
        assert_eq!(console.recorded(), MAX_CONSOLE_ENTRIES + 3);
        assert_eq!(console.entries()[0].message, "line 3");
        assert_eq!(
            console.entries().last().map(|e| e.message.as_str()),
            Some(format!("line {}", MAX_CONSOLE_ENTRIES + 2).as_str())
        );
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Info.label(), "info");
        assert_eq!(Outcome::Allowed.label(), "ok");
        assert_eq!(Outcome::Rejected.label(), "rejected");
    }
}
