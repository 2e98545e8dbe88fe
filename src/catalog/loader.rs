//! Catalog loading

use std::time::Duration;

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{error, info};

use super::{Catalog, CatalogError, DocumentSource};

/// Returned when an operation needs the catalog before it has loaded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogUnavailable {
    /// The documents are still being fetched.
    #[error("the menu is still loading")]
    Loading,

    /// The documents could not be loaded.
    #[error("the menu could not be loaded: {0}")]
    Failed(String),
}

/// Loading state of the catalog.
#[derive(Debug, Default)]
pub enum CatalogState {
    /// Documents have not been fetched yet.
    #[default]
    Loading,

    /// Documents were fetched and validated.
    Ready(Catalog),

    /// Fetching or validation failed.
    Failed(CatalogError),
}

impl CatalogState {
    /// Returns the catalog once it is ready.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogUnavailable`] while loading or after a failed load.
    pub fn require(&self) -> Result<&Catalog, CatalogUnavailable> {
        match self {
            Self::Ready(catalog) => Ok(catalog),
            Self::Loading => Err(CatalogUnavailable::Loading),
            Self::Failed(err) => Err(CatalogUnavailable::Failed(err.to_string())),
        }
    }

    /// Returns the catalog, if ready.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.require().ok()
    }

    /// Whether the catalog is ready.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl From<Result<Catalog, CatalogError>> for CatalogState {
    fn from(result: Result<Catalog, CatalogError>) -> Self {
        match result {
            Ok(catalog) => Self::Ready(catalog),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Fetches the menu and options documents and builds a [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    menu: DocumentSource,
    options: DocumentSource,
    currency: &'static Currency,
    timeout: Duration,
}

impl CatalogLoader {
    /// Creates a loader for the given document sources.
    pub fn new(menu: DocumentSource, options: DocumentSource, currency: &'static Currency) -> Self {
        Self {
            menu,
            options,
            currency,
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout used for URL sources.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetches both documents concurrently and builds the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if either document is missing, malformed or invalid.
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        let (menu, options) =
            tokio::try_join!(self.menu.fetch(&client), self.options.fetch(&client))?;

        let catalog = Catalog::from_json(&menu, &options, self.currency)?;

        info!(
            categories = catalog.categories().len(),
            currency = self.currency.iso_alpha_code,
            "catalog loaded"
        );

        Ok(catalog)
    }

    /// Loads the catalog, folding any failure into [`CatalogState::Failed`].
    pub async fn load_state(&self) -> CatalogState {
        let result = self.load().await;

        if let Err(err) = &result {
            error!(menu = %self.menu, options = %self.options, "failed to load catalog: {err}");
        }

        CatalogState::from(result)
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf};

    use rusty_money::iso::THB;
    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use crate::catalog::test_support::{MENU, OPTIONS};

    use super::*;

    fn document(contents: &str) -> Result<NamedTempFile, std::io::Error> {
        let mut file = NamedTempFile::new()?;
        file.write_all(contents.as_bytes())?;

        Ok(file)
    }

    #[tokio::test]
    async fn load_builds_catalog_from_files() -> TestResult {
        let menu = document(MENU)?;
        let options = document(OPTIONS)?;

        let loader = CatalogLoader::new(
            DocumentSource::File(menu.path().to_path_buf()),
            DocumentSource::File(options.path().to_path_buf()),
            THB,
        );

        let catalog = loader.load().await?;

        assert_eq!(catalog.categories().len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn load_state_reports_missing_documents() -> TestResult {
        let options = document(OPTIONS)?;

        let loader = CatalogLoader::new(
            DocumentSource::File(PathBuf::from("missing/menu.json")),
            DocumentSource::File(options.path().to_path_buf()),
            THB,
        );

        let state = loader.load_state().await;

        assert!(matches!(state, CatalogState::Failed(CatalogError::Io { .. })));
        assert!(matches!(
            state.require(),
            Err(CatalogUnavailable::Failed(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn load_state_reports_malformed_documents() -> TestResult {
        let menu = document("not json")?;
        let options = document(OPTIONS)?;

        let loader = CatalogLoader::new(
            DocumentSource::File(menu.path().to_path_buf()),
            DocumentSource::File(options.path().to_path_buf()),
            THB,
        );

        let state = loader.load_state().await;

        assert!(matches!(state, CatalogState::Failed(CatalogError::Json(_))));

        Ok(())
    }

    #[test]
    fn default_state_is_loading() {
        let state = CatalogState::default();

        assert!(!state.is_ready());
        assert_eq!(state.require().err(), Some(CatalogUnavailable::Loading));
    }
}
