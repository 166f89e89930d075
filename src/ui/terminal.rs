//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, EnvCheckTheme, OutputMode, ProgressSpinner, SpinnerHandle, UserInterface,
};

/// Terminal UI writing status to stdout and problems to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: EnvCheckTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI. Colors follow [`should_use_colors`].
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            EnvCheckTheme::new()
        } else {
            EnvCheckTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        // Spinners only make sense on a live terminal.
        if self.mode.shows_spinners() && self.out.is_term() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }
}

/// Create the UI for a run.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_keeps_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_returns_requested_mode() {
        let ui = create_ui(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn quiet_ui_spinner_is_inert() {
        let mut ui = TerminalUI::new(OutputMode::Quiet);
        let mut spinner = ui.start_spinner("Posting");
        spinner.set_message("still posting");
        spinner.finish_success("Posted");
    }
}
