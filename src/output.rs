//! Structured output for graphcool.
//!
//! Every command receives an [`Output`] through its environment instead of
//! writing to a process-wide logger. The verbosity is fixed when the value is
//! built in `main()`, so two invocations in the same process (tests) never
//! share state.
//!
//! A capturing `Output` records every line instead of printing it.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet = 0,
    Normal = 1,
    Verbose = 2,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

pub struct Output {
    verbosity: Verbosity,
    captured: Option<Mutex<Vec<(Stream, String)>>>,
    spinner: Mutex<Option<ProgressBar>>,
}

impl Output {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            captured: None,
            spinner: Mutex::new(None),
        }
    }

    fn emit(&self, stream: Stream, line: &str) {
        if let Some(captured) = &self.captured {
            if let Ok(mut lines) = captured.lock() {
                lines.push((stream, line.to_string()));
            }
            return;
        }
        // Keep spinner frames from interleaving with regular lines.
        let guard = self.spinner.lock().ok();
        let active = guard.as_ref().and_then(|g| g.as_ref());
        match active {
            Some(pb) => pb.suspend(|| print_line(stream, line)),
            None => print_line(stream, line),
        }
    }

    /// Indented info/detail line. Shown at Normal+.
    pub fn detail(&self, msg: impl AsRef<str>) {
        if self.verbosity >= Verbosity::Normal {
            self.emit(Stream::Stdout, msg.as_ref());
        }
    }

    /// Completion/success indicator. Shown at Normal+.
    pub fn success(&self, msg: impl AsRef<str>) {
        if self.verbosity >= Verbosity::Normal {
            self.emit(Stream::Stdout, msg.as_ref());
        }
    }

    /// Non-fatal warning. Shown at Normal+.
    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.verbosity >= Verbosity::Normal {
            self.emit(Stream::Stderr, msg.as_ref());
        }
    }

    /// Debug/verbose info. Shown at Verbose only.
    pub fn debug(&self, msg: impl AsRef<str>) {
        if self.verbosity >= Verbosity::Verbose {
            self.emit(Stream::Stderr, msg.as_ref());
        }
    }

    /// Final result. Always shown, even in Quiet mode.
    pub fn write(&self, msg: impl AsRef<str>) {
        self.emit(Stream::Stdout, msg.as_ref());
    }

    /// Fatal or user-facing error. Always shown.
    pub fn write_error(&self, msg: impl AsRef<str>) {
        self.emit(Stream::Stderr, msg.as_ref());
    }

    pub fn start_spinner(&self, msg: impl AsRef<str>) {
        let pb = if self.captured.is_some() || self.verbosity == Verbosity::Quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        pb.set_message(msg.as_ref().to_string());
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    pub fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
impl Output {
    /// An output that records lines instead of printing them.
    pub fn capturing(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            captured: Some(Mutex::new(Vec::new())),
            spinner: Mutex::new(None),
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Captured lines written to stdout, joined by newlines.
    pub fn stdout(&self) -> String {
        self.collect(Stream::Stdout)
    }

    /// Captured lines written to stderr, joined by newlines.
    pub fn stderr(&self) -> String {
        self.collect(Stream::Stderr)
    }

    fn collect(&self, stream: Stream) -> String {
        let Some(captured) = &self.captured else {
            return String::new();
        };
        captured
            .lock()
            .map(|lines| {
                lines
                    .iter()
                    .filter(|(s, _)| *s == stream)
                    .map(|(_, l)| l.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }
}

fn print_line(stream: Stream, line: &str) {
    match stream {
        Stream::Stdout => println!("{}", line),
        Stream::Stderr => eprintln!("{}", line),
    }
}
