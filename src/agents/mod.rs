pub mod dependency_updater;
pub mod manifest;
pub mod schema_validator;

pub mod update;
pub use update::{ConsoleReporter, Reporter, UpdateReport};

pub use dependency_updater::DependencyUpdater;
pub use manifest::PyprojectManifest;
pub use schema_validator::SchemaValidator;
