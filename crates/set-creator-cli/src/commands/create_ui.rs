use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a list is fetched and written
///
/// Disabled when stdout/stderr are not terminals; progress then only shows
/// up in the structured log.
pub struct CreateUI {
    spinner: Option<ProgressBar>,
}

impl CreateUI {
    pub fn new(enabled: bool) -> Self {
        if !enabled || !is_interactive() {
            tracing::debug!(
                operation = "ui_init",
                mode = "non_interactive",
                "Progress spinner disabled"
            );
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self {
            spinner: Some(spinner),
        }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        let msg = msg.into();
        match &self.spinner {
            Some(spinner) => spinner.set_message(msg),
            None => tracing::info!(operation = "progress", message = %msg, "Progress update"),
        }
    }

    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
