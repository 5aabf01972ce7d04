//! Remote-storage capability and its HTTP implementation.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use thiserror::Error;

use crate::config::RemoteConfig;

/// Page size used when listing folders.
const LIST_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("no remote access token configured")]
    MissingToken,

    #[error("remote path not found: {0}")]
    NotFound(String),

    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to write {0}: {1}")]
    Write(String, #[source] std::io::Error),
}

/// Kind of a remote folder child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    #[serde(other)]
    Other,
}

/// One child of a listed remote folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: Option<String>,
    pub path: Option<String>,
}

/// What the migration needs from a remote store.
pub trait RemoteStorage {
    /// Immediate children of `path` (not recursive).
    fn list_dir(&self, path: &str) -> Result<Vec<RemoteEntry>, RemoteError>;

    /// Download the file at `remote_path` to `local_path`, overwriting it.
    fn download(&self, remote_path: &str, local_path: &Path) -> Result<(), RemoteError>;
}

#[derive(Debug, Deserialize)]
struct Resource {
    #[serde(rename = "_embedded")]
    embedded: Option<ResourceList>,
}

#[derive(Debug, Deserialize)]
struct ResourceList {
    items: Vec<RemoteEntry>,
    /// Page size the server actually applied.
    limit: Option<usize>,
    offset: Option<usize>,
    total: Option<usize>,
}

impl ResourceList {
    /// False when the server answered for a different offset than requested.
    fn answers(&self, offset: usize) -> bool {
        self.offset.is_none_or(|o| o == offset)
    }

    /// Whether another page follows once `collected` entries are in hand.
    fn has_more(&self, collected: usize) -> bool {
        if self.items.is_empty() {
            return false;
        }
        match self.total {
            Some(total) => collected < total,
            None => self.items.len() >= self.limit.unwrap_or(LIST_LIMIT),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DownloadLink {
    href: String,
}

/// Blocking client for the cloud-disk REST API.
#[derive(Debug)]
pub struct DiskClient {
    http: Client,
    api_base: String,
    token: Option<String>,
}

impl DiskClient {
    pub fn new(cfg: &RemoteConfig) -> Result<Self, RemoteError> {
        let timeout = (cfg.timeout_secs > 0).then(|| Duration::from_secs(cfg.timeout_secs));
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("notemigrate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            token: cfg.token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn authorized(&self, endpoint: &str) -> Result<RequestBuilder, RemoteError> {
        let token = self.token.as_deref().ok_or(RemoteError::MissingToken)?;
        Ok(self
            .http
            .get(format!("{}/{}", self.api_base, endpoint))
            .header(AUTHORIZATION, format!("OAuth {token}")))
    }
}

fn check_status(resp: Response, what: &str) -> Result<Response, RemoteError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound(what.to_string()));
    }
    Err(RemoteError::Status { url: resp.url().to_string(), status: status.as_u16() })
}

impl RemoteStorage for DiskClient {
    fn list_dir(&self, path: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        let mut entries = Vec::new();
        let limit = LIST_LIMIT.to_string();

        loop {
            let offset = entries.len();
            let offset_param = offset.to_string();
            let resp = self
                .authorized("resources")?
                .query(&[
                    ("path", path),
                    ("limit", limit.as_str()),
                    ("offset", offset_param.as_str()),
                ])
                .send()?;
            let resource: Resource = check_status(resp, path)?.json()?;

            let Some(page) = resource.embedded else {
                break;
            };
            if !page.answers(offset) {
                tracing::warn!("Listing of {} ignored offset {}; stopping early", path, offset);
                break;
            }

            let more = page.has_more(offset + page.items.len());
            entries.extend(page.items);
            if !more {
                break;
            }
        }

        tracing::debug!("Listed {} entries under {}", entries.len(), path);
        Ok(entries)
    }

    fn download(&self, remote_path: &str, local_path: &Path) -> Result<(), RemoteError> {
        let resp =
            self.authorized("resources/download")?.query(&[("path", remote_path)]).send()?;
        let link: DownloadLink = check_status(resp, remote_path)?.json()?;

        let mut resp = check_status(self.http.get(&link.href).send()?, remote_path)?;
        let mut file = File::create(local_path)
            .map_err(|e| RemoteError::Write(local_path.display().to_string(), e))?;
        resp.copy_to(&mut file)?;
        Ok(())
    }
}
