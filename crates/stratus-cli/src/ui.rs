//! Terminal input/output.
//!
//! User-facing text goes to stdout, warnings to stderr, prompts read one
//! line from input. Tests run the same type over in-memory buffers.

use std::io::{BufRead, Write};

use stratus_actor::WorkflowUi;

/// The CLI's terminal surface.
#[derive(Debug)]
pub struct Ui<R, O, E> {
    input: R,
    out: O,
    err: E,
}

impl Ui<std::io::BufReader<std::io::Stdin>, std::io::Stdout, std::io::Stderr> {
    /// A UI over the process's standard streams.
    #[must_use]
    pub fn stdio() -> Self {
        Self {
            input: std::io::BufReader::new(std::io::stdin()),
            out: std::io::stdout(),
            err: std::io::stderr(),
        }
    }
}

impl<R: BufRead, O: Write, E: Write> Ui<R, O, E> {
    /// A UI over arbitrary streams.
    pub fn new(input: R, out: O, err: E) -> Self {
        Self { input, out, err }
    }

    /// Writes one line of text.
    pub fn text(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    /// Writes a blank line.
    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    /// Writes the success marker.
    pub fn ok(&mut self) {
        let _ = writeln!(self.out, "OK");
        self.blank();
    }

    /// Writes warnings, one per line, to the warning stream.
    pub fn warnings(&mut self, warnings: &[String]) {
        for warning in warnings {
            let _ = writeln!(self.err, "{warning}");
        }
    }

    /// Asks a yes/no question and reads one line. Anything other than a
    /// clear yes, including a failed read, counts as no.
    pub fn confirm(&mut self, prompt: &str) -> bool {
        let _ = write!(self.out, "{prompt} ");
        let _ = self.out.flush();
        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    /// Consumes the UI, returning the output and warning streams.
    pub fn into_streams(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<R: BufRead, O: Write, E: Write> WorkflowUi for Ui<R, O, E> {
    fn display_text(&mut self, text: &str) {
        self.text(text);
    }

    fn display_warnings(&mut self, warnings: &[String]) {
        self.warnings(warnings);
    }

    fn prompt_yes_no(&mut self, prompt: &str) -> bool {
        self.confirm(prompt)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{streams, test_ui};

    #[test]
    fn text_goes_to_out_warnings_to_err() {
        let mut ui = test_ui("");
        ui.text("hello");
        ui.warnings(&["warning-1".to_owned(), "warning-2".to_owned()]);
        ui.ok();

        let (out, err) = streams(ui);
        assert_eq!(out, "hello\nOK\n\n");
        assert_eq!(err, "warning-1\nwarning-2\n");
    }

    #[test]
    fn confirm_accepts_yes_variants_only() {
        for (input, expected) in [
            ("y\n", true),
            ("Y\n", true),
            ("yes\n", true),
            ("n\n", false),
            ("\n", false),
            ("maybe\n", false),
            ("", false),
        ] {
            let mut ui = test_ui(input);
            assert_eq!(ui.confirm("Really? [yN]:"), expected, "input {input:?}");
        }
    }

    #[test]
    fn confirm_echoes_the_prompt() {
        let mut ui = test_ui("n\n");
        ui.confirm("Are you sure? [yN]:");
        let (out, _) = streams(ui);
        assert_eq!(out, "Are you sure? [yN]: ");
    }
}
