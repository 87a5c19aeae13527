use crate::agents::manifest::GroupName;
use crate::pep508::SkipReason;

/// A specifier that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierChange {
    pub group: GroupName,
    pub old: String,
    pub new: String,
}

/// Tracks the outcome of every specifier processed during a run.
#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    /// Rewritten specifiers, in processing order
    pub changes: Vec<SpecifierChange>,
    /// Specifiers already pinned to the latest version
    pub up_to_date: usize,
    /// Specifiers whose version could not be looked up
    pub unavailable: usize,
    /// Specifiers with a form this tool does not rewrite
    pub unsupported: usize,
}

impl UpdateReport {
    /// Create a new empty update report
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_update(&mut self, group: &GroupName, old: String, new: String) {
        self.changes.push(SpecifierChange {
            group: group.clone(),
            old,
            new,
        });
    }

    pub fn add_skip(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::UpToDate => self.up_to_date += 1,
            SkipReason::LookupUnavailable | SkipReason::MalformedVersion(_) => {
                self.unavailable += 1
            }
            SkipReason::Unsupported(_) => self.unsupported += 1,
        }
    }

    /// Check if the report is empty (no updates)
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Get the total number of updates
    pub fn total_updates(&self) -> usize {
        self.changes.len()
    }
}
