// Update bookkeeping shared by the dependency updater and the workflow:
// - UpdateReport: tracks what changed and why the rest did not
// - Reporter: progress sink for per-specifier decisions
pub mod context;
pub mod reporter;

pub use context::UpdateReport;
pub use reporter::{ConsoleReporter, Reporter};
