//! Shared router state and the per-request unit of work.

use crate::error::ApiError;
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;
use trivia_core::db::open_store;
use trivia_core::{RepoError, ServiceResult, StoreConfig};

/// Immutable state shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    store: StoreConfig,
}

impl AppState {
    pub fn new(store: StoreConfig) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    /// Runs `work` on a blocking worker against a freshly opened connection.
    ///
    /// The connection lives only for this call; nothing is cached between
    /// requests.
    pub async fn run<T, F>(&self, op: &'static str, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
    {
        let store = self.store.clone();
        let started_at = Instant::now();

        let joined = tokio::task::spawn_blocking(move || {
            let conn = open_store(&store).map_err(RepoError::from)?;
            work(&conn)
        })
        .await;

        match joined {
            Ok(Ok(value)) => {
                info!(
                    "event=http_request op={} status=ok duration_ms={}",
                    op,
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Ok(Err(err)) => Err(ApiError::from_service(op, err)),
            Err(err) => {
                error!(
                    "event=http_request op={} status=error error_code=worker_failed duration_ms={} error={}",
                    op,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(ApiError::Internal)
            }
        }
    }
}
