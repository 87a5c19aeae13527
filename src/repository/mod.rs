use crate::error::Result;

pub mod factory;
pub use factory::RepositoryFactory;

/// Answers "what is the latest published version of this package".
///
/// `Ok(None)` means the index has no usable answer (unknown package, HTTP
/// error status, unreachable host). `Err` is reserved for responses that
/// could not be decoded.
pub trait PackageIndex {
    fn latest_version(&self, package: &str) -> Result<Option<String>>;
}
