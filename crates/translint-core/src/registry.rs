//! Package-registry privacy lookups with per-run memoization.
//!
//! A package absent from the public registry (HTTP 404 on its metadata
//! endpoint) is considered private. Privacy drives the homepage policy:
//! private packages must declare a `homepage` field.

use std::collections::HashMap;

use reqwest::{Client, StatusCode, header};
use thiserror::Error;

use crate::types::PackageId;

/// Registry lookup failures. All of these are fatal to a lint run: they
/// mean the policy could not be evaluated, not that the metadata is bad.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry returned HTTP {status} for {package}")]
    UnexpectedStatus {
        package: PackageId,
        status: StatusCode,
    },

    #[error("invalid registry base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Memoized public/private status lookups against a package registry.
///
/// Instantiated once per run; results live for the run's lifetime and are
/// never invalidated (registry state is effectively static over a run).
/// At most one network call is made per distinct package identifier.
#[derive(Debug)]
pub struct RegistryCache {
    client: Client,
    base_url: String,
    privacy: HashMap<PackageId, bool>,
}

impl RegistryCache {
    /// Build a cache talking to the registry at `base_url`
    /// (e.g. `https://packagist.org`).
    pub fn new(base_url: &str) -> Result<Self, RegistryError> {
        if !base_url.starts_with("http") {
            return Err(RegistryError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(crate::USER_AGENT),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            privacy: HashMap::new(),
        })
    }

    /// Whether `package` is absent from the public registry.
    ///
    /// On a cache miss this issues `GET <base>/p/<vendor>/<name>.json`:
    /// a success status means the package is public, 404 means private.
    ///
    /// # Errors
    ///
    /// Any other status code, and any transport failure, is returned as a
    /// [`RegistryError`] and is expected to abort the whole run.
    pub async fn is_private(&mut self, package: &PackageId) -> Result<bool, RegistryError> {
        if let Some(&private) = self.privacy.get(package) {
            tracing::debug!(package = %package, private, "registry cache hit");
            return Ok(private);
        }

        let url = format!("{}/p/{}.json", self.base_url, package);
        let resp = self.client.get(&url).send().await?;

        let private = match resp.status() {
            StatusCode::NOT_FOUND => true,
            status if status.is_success() => false,
            status => {
                return Err(RegistryError::UnexpectedStatus {
                    package: package.clone(),
                    status,
                });
            }
        };

        tracing::debug!(package = %package, private, "registry lookup");
        self.privacy.insert(package.clone(), private);
        Ok(private)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn pkg(vendor: &str, name: &str) -> PackageId {
        PackageId::new(vendor, name)
    }

    #[tokio::test]
    async fn public_package_on_200() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/p/acme/widget.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"packages":{}}"#)
            .create_async()
            .await;

        let mut cache = RegistryCache::new(&server.url()).unwrap();
        assert!(!cache.is_private(&pkg("acme", "widget")).await.unwrap());
    }

    #[tokio::test]
    async fn private_package_on_404() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/p/acme/secret.json")
            .with_status(404)
            .create_async()
            .await;

        let mut cache = RegistryCache::new(&server.url()).unwrap();
        assert!(cache.is_private(&pkg("acme", "secret")).await.unwrap());
    }

    #[tokio::test]
    async fn server_error_is_fatal() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/p/acme/flaky.json")
            .with_status(503)
            .create_async()
            .await;

        let mut cache = RegistryCache::new(&server.url()).unwrap();
        let err = cache.is_private(&pkg("acme", "flaky")).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnexpectedStatus { status, .. } if status.as_u16() == 503
        ));
    }

    #[tokio::test]
    async fn lookup_is_memoized_per_package() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/p/acme/widget.json")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let mut cache = RegistryCache::new(&server.url()).unwrap();
        for _ in 0..3 {
            assert!(cache.is_private(&pkg("acme", "widget")).await.unwrap());
        }
        mock.assert_async().await;
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(matches!(
            RegistryCache::new("ftp://example.com"),
            Err(RegistryError::InvalidBaseUrl(_))
        ));
    }
}
