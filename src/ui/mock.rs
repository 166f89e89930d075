//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures every
//! interaction for later assertion, including how each spinner finished.
//!
//! # Example
//!
//! ```
//! use envcheck::ui::{MockUI, SpinnerStatus, UserInterface};
//!
//! let mut ui = MockUI::new();
//! let mut spinner = ui.start_spinner("Activating ml-prod");
//! spinner.finish_success("Collected 12 packages");
//!
//! assert_eq!(ui.spinners(), ["Activating ml-prod"]);
//! assert_eq!(
//!     ui.spinner_results(),
//!     [("Collected 12 packages".to_string(), SpinnerStatus::Success)]
//! );
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// How a spinner was finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Error,
}

type SpinnerLog = Rc<RefCell<Vec<(String, SpinnerStatus)>>>;

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    spinner_results: SpinnerLog,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Messages of every spinner that was started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Final message and status of every spinner that was finished.
    pub fn spinner_results(&self) -> Vec<(String, SpinnerStatus)> {
        self.spinner_results.borrow().clone()
    }

    /// Check if a message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            message: message.to_string(),
            log: Rc::clone(&self.spinner_results),
        })
    }
}

/// Spinner returned by [`MockUI`]; finishing it records into the UI.
#[derive(Debug)]
pub struct MockSpinner {
    message: String,
    log: SpinnerLog,
}

impl MockSpinner {
    /// Current spinner message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.message = msg.to_string();
    }

    fn finish_success(&mut self, msg: &str) {
        self.log
            .borrow_mut()
            .push((msg.to_string(), SpinnerStatus::Success));
    }

    fn finish_error(&mut self, msg: &str) {
        self.log
            .borrow_mut()
            .push((msg.to_string(), SpinnerStatus::Error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_status_lines() {
        let mut ui = MockUI::new();
        ui.message("Checking ml-prod");
        ui.success("No incompatibilities found");
        ui.warning("2 incompatibilities found");
        ui.error("Activation failed");
        ui.show_header("ml-prod");

        assert!(ui.has_message("ml-prod"));
        assert!(ui.has_success("No incompatibilities"));
        assert!(ui.has_warning("2 incompatibilities"));
        assert!(ui.has_error("Activation"));
        assert_eq!(ui.headers(), ["ml-prod"]);
    }

    #[test]
    fn records_spinner_outcomes_in_order() {
        let mut ui = MockUI::new();

        let mut first = ui.start_spinner("Activating ml-prod");
        first.set_message("Listing packages");
        first.finish_error("Activation failed");

        let mut second = ui.start_spinner("Posting report");
        second.finish_success("Posted");

        assert_eq!(ui.spinners(), ["Activating ml-prod", "Posting report"]);
        assert_eq!(
            ui.spinner_results(),
            vec![
                ("Activation failed".to_string(), SpinnerStatus::Error),
                ("Posted".to_string(), SpinnerStatus::Success),
            ]
        );
    }

    #[test]
    fn with_mode_sets_mode() {
        let ui = MockUI::with_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
