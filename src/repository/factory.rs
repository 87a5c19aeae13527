use crate::error::Result;
use crate::pypi::{DEFAULT_INDEX_URL, PypiClient};
use crate::repository::PackageIndex;
use std::time::Duration;

pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Builds the JSON API client, falling back to pypi.org when no index is given.
    pub fn create_pypi(
        index_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Box<dyn PackageIndex>> {
        let client = PypiClient::new(index_url.unwrap_or(DEFAULT_INDEX_URL), timeout)?;
        Ok(Box::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BumpError;

    #[test]
    fn creates_default_client() {
        assert!(RepositoryFactory::create_pypi(None, Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn rejects_bad_index_url() {
        let err = RepositoryFactory::create_pypi(Some("ftp://example.com"), Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(matches!(err, BumpError::Config(_)));
    }
}
