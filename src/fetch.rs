//! HTTP fetching
//!
//! Commands fetch through the [`Fetch`] trait; [`HttpFetcher`] is the reqwest
//! implementation used by the binary.

use log::debug;

use crate::errors::AppError;

/// Fetch the body of a URL as text
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String, AppError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client, optionally accepting invalid TLS certificates
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(ignore_tls_errors: bool) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("get-dtos/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(ignore_tls_errors)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        debug!("GET {}", url);
        let network_error = |source| AppError::NetworkError {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(network_error)?;

        response.text().await.map_err(network_error)
    }
}

#[cfg(test)]
pub mod testing {
    use std::{cell::RefCell, collections::HashMap};

    use super::Fetch;
    use crate::errors::AppError;

    /// Serves canned bodies and records every requested URL
    #[derive(Default)]
    pub struct StubFetcher {
        bodies: HashMap<String, String>,
        /// Body for URLs without a canned entry; `None` fails the request
        fallback: Option<String>,
        pub requests: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        pub fn with_body(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), body.to_string());
            self
        }

        pub fn with_fallback(mut self, body: &str) -> Self {
            self.fallback = Some(body.to_string());
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    impl Fetch for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, AppError> {
            self.requests.borrow_mut().push(url.to_string());
            self.bodies
                .get(url)
                .or(self.fallback.as_ref())
                .cloned()
                .ok_or_else(|| AppError::IoError(std::io::Error::other(format!("no stub for {url}"))))
        }
    }
}
