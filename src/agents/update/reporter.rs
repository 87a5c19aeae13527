use crate::agents::manifest::GroupName;
use crate::pep508::SkipReason;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Receives progress events while dependency groups are processed.
///
/// Keeps console state out of the update logic; tests plug in a recorder.
pub trait Reporter {
    fn group_started(&mut self, group: &GroupName, count: usize);
    fn lookup_started(&mut self, specifier: &str);
    fn updated(&mut self, old: &str, new: &str);
    fn skipped(&mut self, specifier: &str, reason: &SkipReason);
    fn group_finished(&mut self, group: &GroupName);
}

/// Prints one line per specifier and shows a spinner during lookups.
pub struct ConsoleReporter {
    quiet: bool,
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            spinner: None,
        }
    }

    fn emit(&self, line: String) {
        if self.quiet {
            return;
        }
        match &self.spinner {
            Some(pb) => pb.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }

    fn new_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl Reporter for ConsoleReporter {
    fn group_started(&mut self, group: &GroupName, count: usize) {
        let label = match group {
            GroupName::Main => "project.dependencies".to_string(),
            GroupName::Optional(name) => format!("project.optional-dependencies.{name}"),
        };
        self.emit(format!(
            "\n{} ({} specifier{})",
            label.cyan().bold(),
            count,
            if count == 1 { "" } else { "s" }
        ));
        if !self.quiet {
            self.spinner = Some(Self::new_spinner());
        }
    }

    fn lookup_started(&mut self, specifier: &str) {
        if let Some(pb) = &self.spinner {
            pb.set_message(format!("checking {specifier}"));
        }
    }

    fn updated(&mut self, old: &str, new: &str) {
        self.emit(format!(
            "{} '{}' to '{}'",
            "updating:".green(),
            old,
            new.green().bold()
        ));
    }

    fn skipped(&mut self, specifier: &str, reason: &SkipReason) {
        let reason = match reason {
            SkipReason::UpToDate => reason.to_string().dimmed(),
            _ => reason.to_string().yellow(),
        };
        self.emit(format!(
            "{} '{}' ({})",
            "not updating:".dimmed(),
            specifier,
            reason
        ));
    }

    fn group_finished(&mut self, _group: &GroupName) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}
