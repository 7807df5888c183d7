//! HTTP client for the remote progress/gamification authority.

use std::time::Duration;

use url::Url;

use super::types::{CompletionRequest, CompletionResponse, GamificationSnapshot, ProgressSummary, SyncError};

/// Default bound on how long a completion recording may stall phase
/// advancement before the engine proceeds locally.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for the three sync operations. All calls are best-effort from
/// the engine's point of view; only `record_completion` is sequenced into
/// the completion protocol, and even that proceeds on failure.
#[derive(Debug, Clone)]
pub struct SyncClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl SyncClient {
    pub fn new(base_url: Url, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, SyncError> {
        Ok(self.base_url.join(path)?)
    }

    /// Record one completed work phase. Bounded by the configured timeout
    /// so an unresponsive remote cannot stall phase advancement.
    pub async fn record_completion(
        &self,
        focus_seconds: u32,
    ) -> Result<CompletionResponse, SyncError> {
        let url = self.endpoint("/api/progress/complete")?;
        let body = CompletionRequest { focus_seconds };
        let fut = async {
            let resp = self.client.post(url).json(&body).send().await?;
            if !resp.status().is_success() {
                return Err(SyncError::Http {
                    status: resp.status().as_u16(),
                });
            }
            Ok(resp.json::<CompletionResponse>().await?)
        };
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| SyncError::Timeout {
                secs: self.timeout.as_secs(),
            })?
    }

    /// Fetch today's aggregate progress.
    pub async fn fetch_progress(&self) -> Result<ProgressSummary, SyncError> {
        let url = self.endpoint("/api/progress")?;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(SyncError::Http {
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }

    /// Fetch the full gamification record.
    pub async fn fetch_gamification(&self) -> Result<GamificationSnapshot, SyncError> {
        let url = self.endpoint("/api/gamification")?;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(SyncError::Http {
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }
}
