//! Catalog document sources

use std::{convert::Infallible, fmt, path::PathBuf, str::FromStr};

use tracing::debug;

use super::CatalogError;

/// Where a catalog document is fetched from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentSource {
    /// A file on the local filesystem
    File(PathBuf),

    /// An `http://` or `https://` URL
    Url(String),
}

impl DocumentSource {
    /// Fetches the raw document text.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read, the request fails, or the
    /// server answers with a non-success status.
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<String, CatalogError> {
        debug!(source = %self, "fetching catalog document");

        match self {
            Self::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        document: self.to_string(),
                        source,
                    })
            }
            Self::Url(url) => {
                let response = client.get(url).send().await?;
                let status = response.status();

                if !status.is_success() {
                    return Err(CatalogError::HttpStatus {
                        document: url.clone(),
                        status: status.as_u16(),
                    });
                }

                Ok(response.text().await?)
            }
        }
    }
}

impl FromStr for DocumentSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}
