//! Console narration of a pipeline run.

use async_trait::async_trait;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use rivalscope_application::ports::events::EventSink;
use rivalscope_domain::{EventKind, PipelineEvent};

/// Event sink that narrates the run on the terminal: a live spinner for
/// status frames, a printed line per stage completion, red for the terminal
/// error frame.
pub struct ConsoleNarrator {
    spinner: ProgressBar,
}

impl ConsoleNarrator {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    fn describe(event: &PipelineEvent) -> String {
        let agent = event
            .agent
            .map(|a| a.as_str())
            .unwrap_or("pipeline");
        match (&event.step, &event.detail) {
            (Some(step), Some(detail)) => format!("[{agent}] {step}: {detail}"),
            (Some(step), None) => format!("[{agent}] {step}"),
            (None, Some(detail)) => format!("[{agent}] {detail}"),
            (None, None) => format!("[{agent}]"),
        }
    }
}

impl Default for ConsoleNarrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for ConsoleNarrator {
    async fn emit(&self, event: PipelineEvent) {
        let line = Self::describe(&event);
        match event.kind {
            EventKind::Status => {
                self.spinner.set_message(line);
            }
            EventKind::Discovery | EventKind::DeepDive | EventKind::Report => {
                self.spinner.println(format!("{} {}", "✓".green(), line.bold()));
            }
            EventKind::Done => {
                self.spinner
                    .finish_with_message(format!("{}", "Pipeline complete".green().bold()));
            }
            EventKind::Error => {
                let detail = event.detail.as_deref().unwrap_or("unknown error");
                self.spinner
                    .abandon_with_message(format!("{} {}", "✗".red(), detail.red()));
            }
        }
    }
}
