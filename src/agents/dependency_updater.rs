use crate::agents::manifest::{DependencyGroup, GroupName};
use crate::agents::update::{Reporter, UpdateReport};
use crate::pep508::update_specifier;
use crate::repository::PackageIndex;
use tracing::debug;

/// DependencyUpdater rewrites every pinned specifier of every group
pub struct DependencyUpdater {
    index: Box<dyn PackageIndex>,
}

impl DependencyUpdater {
    pub fn new(index: Box<dyn PackageIndex>) -> Self {
        Self { index }
    }

    /// Update all groups in place, one specifier at a time.
    pub fn update_groups(
        &self,
        groups: &mut [DependencyGroup],
        reporter: &mut dyn Reporter,
    ) -> UpdateReport {
        let mut report = UpdateReport::new();

        for group in groups.iter_mut() {
            reporter.group_started(&group.name, group.specifiers.len());
            group.specifiers =
                self.update_dependencies(&group.name, &group.specifiers, reporter, &mut report);
            reporter.group_finished(&group.name);
        }

        report
    }

    /// Returns a list of the same length and order as `specifiers`; entries
    /// that cannot be updated are copied through unchanged.
    pub fn update_dependencies(
        &self,
        group: &GroupName,
        specifiers: &[String],
        reporter: &mut dyn Reporter,
        report: &mut UpdateReport,
    ) -> Vec<String> {
        specifiers
            .iter()
            .map(|specifier| {
                reporter.lookup_started(specifier);
                match update_specifier(specifier, self.index.as_ref()) {
                    Ok(updated) => {
                        reporter.updated(specifier, &updated);
                        report.add_update(group, specifier.clone(), updated.clone());
                        updated
                    }
                    Err(reason) => {
                        debug!(%group, specifier = specifier.as_str(), %reason, "skipped");
                        reporter.skipped(specifier, &reason);
                        report.add_skip(&reason);
                        specifier.clone()
                    }
                }
            })
            .collect()
    }
}
