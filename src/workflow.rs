use crate::agents::{
    ConsoleReporter, DependencyUpdater, PyprojectManifest, Reporter, SchemaValidator, UpdateReport,
};
use crate::error::Result;
use crate::repository::{PackageIndex, RepositoryFactory};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Settings for a single bump run, collected from the command line.
#[derive(Debug, Clone)]
pub struct BumpOptions {
    pub manifest_path: PathBuf,
    pub index_url: Option<String>,
    pub timeout: Duration,
    pub dry_run: bool,
    pub quiet: bool,
}

/// Execute the bump workflow against the configured package index
pub fn execute_bump(options: &BumpOptions) -> Result<UpdateReport> {
    let index = RepositoryFactory::create_pypi(options.index_url.as_deref(), options.timeout)?;
    let mut reporter = ConsoleReporter::new(options.quiet);
    run_bump(options, index, &mut reporter)
}

/// Load, validate, update and write back the manifest.
///
/// Every fatal error is raised before the file is written, so a failed run
/// leaves the manifest as it was.
pub fn run_bump(
    options: &BumpOptions,
    index: Box<dyn PackageIndex>,
    reporter: &mut dyn Reporter,
) -> Result<UpdateReport> {
    let say = |line: String| {
        if !options.quiet {
            println!("{line}");
        }
    };

    say(format!(
        "{} {}",
        "loading:".cyan(),
        options.manifest_path.display()
    ));
    let mut manifest = PyprojectManifest::load(&options.manifest_path)?;

    say(format!("{} {}", "validating:".cyan(), manifest.file_name()));
    SchemaValidator::validate(manifest.document())?;

    let mut groups = manifest.dependency_groups()?;
    debug!(groups = groups.len(), "collected dependency groups");

    let updater = DependencyUpdater::new(index);
    let report = updater.update_groups(&mut groups, reporter);

    let rewritten: usize = groups
        .iter()
        .map(|group| manifest.replace_group(group))
        .sum();
    debug!(rewritten, "rewrote specifiers in document");

    print_summary(&report, options.quiet);

    if options.dry_run {
        say(format!(
            "\n{}",
            format!("dry run: {} was not modified", manifest.file_name()).yellow()
        ));
    } else if rewritten == 0 {
        say(format!(
            "\n{}",
            format!("no changes: {} left untouched", manifest.file_name()).yellow()
        ));
    } else {
        manifest.save()?;
        say(format!(
            "\n{}",
            format!(
                "generated new {} with updated dependencies",
                manifest.file_name()
            )
            .green()
            .bold()
        ));
    }

    Ok(report)
}

fn print_summary(report: &UpdateReport, quiet: bool) {
    if quiet {
        return;
    }

    println!("\n{}", "Summary:".cyan().bold());
    if report.is_empty() {
        println!("  {}", "every pinned dependency is already up to date".dimmed());
    }
    for change in &report.changes {
        println!(
            "  • [{}] {} → {}",
            change.group,
            change.old.dimmed(),
            change.new.green()
        );
    }
    println!(
        "  {} updated",
        report.total_updates().to_string().green()
    );
    println!("  {} already latest", report.up_to_date.to_string().yellow());
    println!(
        "  {} unsupported specifiers",
        report.unsupported.to_string().yellow()
    );
    println!(
        "  {} lookups failed",
        report.unavailable.to_string().yellow()
    );
}
