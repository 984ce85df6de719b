//! Console reporter: spinner and colored stage messages.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::Value;

use api2ics_pipeline::{Reporter, Stage};

/// Reporter that renders pipeline progress on the terminal.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    /// Creates a console reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints the startup banner.
    pub fn banner(&self) {
        println!(
            "Started {} {}",
            "API2ICS".blue().bold(),
            format!("(v{})", env!("CARGO_PKG_VERSION")).dimmed()
        );
        println!("{}", "Starting API data collection...".dimmed().italic());
    }

    fn spin(&mut self, message: String) {
        match &self.spinner {
            Some(spinner) => spinner.set_message(message),
            None => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .tick_strings(&["-", "\\", "|", "/"])
                        .template("{spinner} {msg}")
                        .expect("spinner template is valid"),
                );
                spinner.set_message(message);
                spinner.enable_steady_tick(std::time::Duration::from_millis(80));
                self.spinner = Some(spinner);
            }
        }
    }

    fn stop(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn start(&mut self, stage: Stage, context: Option<&str>) {
        let message = match stage {
            Stage::Fetch => match context {
                Some(page) => format!("Fetching data from API... {}", format!("({})", page).dimmed()),
                None => "Fetching data from API...".to_string(),
            },
            Stage::Convert => "Converting data to ICS format...".to_string(),
            Stage::Write => match context {
                Some(filename) => format!("Generating '{}' file...", filename),
                None => "Generating file...".to_string(),
            },
            _ => return,
        };
        self.spin(message);
    }

    fn succeed(&mut self, _stage: Stage, message: &str) {
        self.stop();
        println!("{} {}", "✔".green(), message.green());
    }

    fn fail(&mut self, stage: Stage, message: &str, payload: Option<&Value>) {
        self.stop();
        eprintln!("{} {}", "✖".red(), message.red().bold());

        // Filter failures come with the decoded body for diagnosis.
        if stage == Stage::Filter
            && let Some(payload) = payload
        {
            println!("{}", "Response from API:".dimmed().italic());
            match serde_json::to_string_pretty(payload) {
                Ok(pretty) => println!("{}", pretty),
                Err(_) => println!("{}", payload),
            }
        }
    }
}
