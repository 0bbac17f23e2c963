//! Typed client for OGC API Records item operations.
//!
//! ## Paths (relative to the per-request catalogue endpoint)
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/collections/{collection}/items/{id}` | Lookup |
//! | POST   | `/collections/{collection}/items` | Create |
//! | PUT    | `/collections/{collection}/items/{id}` | Update |
//! | DELETE | `/collections/{collection}/items/{id}` | Delete |
//!
//! Only a 404 on lookup means "absent". Every other non-success status is
//! an error, so a catalogue outage can never be mistaken for a missing item.

use async_trait::async_trait;
use registrar_core::{
    Catalogue, CatalogueEndpoint, CatalogueError, ItemId, Lookup, ResourceDocument,
};
use reqwest::StatusCode;
use serde_json::Value;
use zeroize::Zeroizing;

/// Media type used for item bodies sent to the catalogue.
const ITEM_CONTENT_TYPE: &str = "application/geo+json";

/// Error bodies longer than this are truncated in diagnostics.
const MAX_ERROR_BODY: usize = 1024;

/// Client for the records catalogue item API.
#[derive(Clone)]
pub struct RecordsClient {
    http: reqwest::Client,
    token: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for RecordsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordsClient")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RecordsClient {
    pub(crate) fn new(http: reqwest::Client, token: Option<Zeroizing<String>>) -> Self {
        Self { http, token }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token.as_str()),
            None => req,
        }
    }

    async fn send(
        &self,
        endpoint: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, CatalogueError> {
        self.authorize(req)
            .send()
            .await
            .map_err(|e| CatalogueError::Transport {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            })
    }
}

/// Build the error for an unexpected status, reading (and truncating) the body.
async fn status_error(endpoint: String, resp: reqwest::Response) -> CatalogueError {
    let status = resp.status().as_u16();
    let mut body = resp.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    CatalogueError::Status {
        endpoint,
        status,
        body,
    }
}

#[async_trait]
impl Catalogue for RecordsClient {
    async fn lookup(
        &self,
        endpoint: &CatalogueEndpoint,
        collection: &str,
        id: &ItemId,
    ) -> Result<Lookup, CatalogueError> {
        let url = endpoint.item_url(collection, id);
        let label = format!("GET {url}");
        tracing::debug!(%url, "catalogue lookup");

        let resp = self.send(&label, self.http.get(url)).await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(Lookup::Absent);
        }
        if !resp.status().is_success() {
            return Err(status_error(label, resp).await);
        }

        resp.json::<Value>()
            .await
            .map(Lookup::Found)
            .map_err(|e| CatalogueError::Decode {
                endpoint: label,
                source: Box::new(e),
            })
    }

    async fn create(
        &self,
        endpoint: &CatalogueEndpoint,
        collection: &str,
        document: &ResourceDocument,
    ) -> Result<(), CatalogueError> {
        let url = endpoint.items_url(collection);
        let label = format!("POST {url}");
        tracing::debug!(%url, id = %document.id(), "catalogue create");

        let req = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, ITEM_CONTENT_TYPE)
            .json(document.body());
        let resp = self.send(&label, req).await?;

        if resp.status() == StatusCode::CONFLICT {
            return Err(CatalogueError::Conflict {
                collection: collection.to_string(),
                id: document.id().to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(status_error(label, resp).await);
        }
        Ok(())
    }

    async fn update(
        &self,
        endpoint: &CatalogueEndpoint,
        collection: &str,
        id: &ItemId,
        document: &ResourceDocument,
    ) -> Result<(), CatalogueError> {
        let url = endpoint.item_url(collection, id);
        let label = format!("PUT {url}");
        tracing::debug!(%url, "catalogue update");

        let req = self
            .http
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, ITEM_CONTENT_TYPE)
            .json(document.body());
        let resp = self.send(&label, req).await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(CatalogueError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(status_error(label, resp).await);
        }
        Ok(())
    }

    async fn delete(
        &self,
        endpoint: &CatalogueEndpoint,
        collection: &str,
        id: &ItemId,
    ) -> Result<(), CatalogueError> {
        let url = endpoint.item_url(collection, id);
        let label = format!("DELETE {url}");
        tracing::debug!(%url, "catalogue delete");

        let resp = self.send(&label, self.http.delete(url)).await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(CatalogueError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(status_error(label, resp).await);
        }
        Ok(())
    }
}
