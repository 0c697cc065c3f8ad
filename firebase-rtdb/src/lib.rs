//! Minimal Firebase Realtime Database record store.
//!
//! Reads and writes the family collection at `/<collection>.json` under a
//! Realtime Database URL via the REST interface, and exposes
//! ETag-conditional writes so concurrent writers can run their
//! load-mutate-save sequence as a compare-and-swap loop instead of racing.

use async_trait::async_trait;
use silsilah_core::{Family, RecordStore, StoreError};
use thiserror::Error;

const DEFAULT_COLLECTION: &str = "family";

/// Errors that can occur when talking to the Realtime Database.
#[derive(Debug, Error)]
pub enum Error {
    #[error("FIREBASE_DATABASE_URL not configured")]
    NoDatabaseUrl,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse stored data: {0}")]
    Parse(String),

    #[error("Conditional write rejected: stored data changed")]
    Conflict,
}

/// Firebase Realtime Database record store.
#[derive(Debug, Clone)]
pub struct FirebaseStore {
    client: reqwest::Client,
    database_url: String,
    collection: String,
    auth_token: Option<String>,
}

impl FirebaseStore {
    /// Create a store for the given database URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            database_url: database_url.into().trim_end_matches('/').to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            auth_token: None,
        }
    }

    /// Create a store from the FIREBASE_DATABASE_URL environment variable,
    /// picking up FIREBASE_AUTH_TOKEN when present.
    pub fn from_env() -> Result<Self, Error> {
        let database_url =
            std::env::var("FIREBASE_DATABASE_URL").map_err(|_| Error::NoDatabaseUrl)?;
        let mut store = Self::new(database_url);
        if let Ok(token) = std::env::var("FIREBASE_AUTH_TOKEN") {
            store.auth_token = Some(token);
        }
        Ok(store)
    }

    /// Store the collection under a different key (defaults to "family").
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Authorize requests with a database auth token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn collection_url(&self) -> String {
        match &self.auth_token {
            Some(token) => format!(
                "{}/{}.json?auth={}",
                self.database_url, self.collection, token
            ),
            None => format!("{}/{}.json", self.database_url, self.collection),
        }
    }

    /// Load the collection together with its ETag for a later conditional
    /// write.
    pub async fn load_with_etag(&self) -> Result<(Family, String), Error> {
        let response = self
            .client
            .get(self.collection_url())
            .header("X-Firebase-ETag", "true")
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let etag = response
            .headers()
            .get("ETag")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok((decode_family(&body)?, etag))
    }

    /// Replace the collection only if it still carries `etag`.
    ///
    /// Returns [`Error::Conflict`] when a concurrent writer got there
    /// first; callers reload and retry their mutation.
    pub async fn save_if_match(&self, family: &Family, etag: &str) -> Result<(), Error> {
        let response = self
            .client
            .put(self.collection_url())
            .header("if-match", etag)
            .json(family)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if response.status().as_u16() == 412 {
            tracing::warn!(collection = %self.collection, "conditional write lost a race");
            return Err(Error::Conflict);
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    async fn fetch(&self) -> Result<Family, Error> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let family = decode_family(&body)?;
        tracing::debug!(collection = %self.collection, members = family.len(), "loaded family");
        Ok(family)
    }

    async fn put(&self, family: &Family) -> Result<(), Error> {
        let response = self
            .client
            .put(self.collection_url())
            .json(family)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        tracing::debug!(collection = %self.collection, members = family.len(), "saved family");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FirebaseStore {
    async fn load(&self) -> Result<Family, StoreError> {
        self.fetch().await.map_err(StoreError::from)
    }

    async fn save(&self, family: &Family) -> Result<(), StoreError> {
        self.put(family).await.map_err(StoreError::from)
    }
}

impl From<Error> for StoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Conflict => StoreError::Conflict,
            Error::Parse(message) => StoreError::Corrupt(message),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Decode a collection response body.
///
/// The database returns the JSON literal `null` for a collection that has
/// never been written; that is the empty family.
fn decode_family(body: &str) -> Result<Family, Error> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Family::new());
    }
    serde_json::from_str(trimmed).map_err(|e| Error::Parse(e.to_string()))
}

async fn api_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    Error::Api { status, message }
}
