//! The sync pipeline.
//!
//! One run fetches every configured endpoint in order, aggregates the
//! returned records, tabulates them, writes the block through the
//! [`RowSink`] seam, and ensures the recurring trigger exists. Nothing
//! is written until every endpoint has been processed: a failure on the
//! last endpoint discards everything fetched before it.

use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use sheetsync_core::{
    tabulate, ApiConfig, EndpointAttempt, Record, RefreshMode, RowSink, SyncReport, TriggerHost,
};

use crate::client::{ApiClient, CallOptions};
use crate::error::FetchError;
use crate::schema;

/// Default required top-level keys in every endpoint payload.
const REQUIRED_KEYS: &[&str] = &["data"];

// ============================================================================
// Endpoint Fetch Seam
// ============================================================================

/// One endpoint fetch: URL in, decoded JSON payload out.
///
/// [`ApiClient`] is the production implementation; tests drive the
/// pipeline with canned payloads instead.
pub trait EndpointFetch {
    /// Fetches `url` with bearer authentication and decodes the body.
    fn fetch(
        &self,
        url: &str,
        api_key: &str,
    ) -> impl std::future::Future<Output = Result<Value, FetchError>> + Send;
}

impl EndpointFetch for ApiClient {
    async fn fetch(&self, url: &str, api_key: &str) -> Result<Value, FetchError> {
        self.call(url, &CallOptions::bearer(api_key)).await
    }
}

// ============================================================================
// Sync Pipeline
// ============================================================================

/// Orchestrates one sync run over the configured endpoints.
pub struct SyncPipeline<F> {
    api: ApiConfig,
    fetcher: F,
    required_keys: Vec<String>,
}

impl<F: EndpointFetch> SyncPipeline<F> {
    /// Creates a pipeline over the given API configuration.
    pub fn new(api: ApiConfig, fetcher: F) -> Self {
        Self {
            api,
            fetcher,
            required_keys: REQUIRED_KEYS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replaces the required top-level keys checked on every payload.
    pub fn with_required_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Runs the pipeline: fetch, aggregate, write, schedule.
    ///
    /// Returns a report with the rows written and one attempt record per
    /// endpoint. The first error aborts the run; it is logged here and
    /// propagated unmodified, and the sink is never called on a partial
    /// aggregate.
    #[instrument(skip_all, fields(endpoints = self.api.endpoints.len(), mode = %mode))]
    pub async fn run<S, T>(
        &self,
        sink: &mut S,
        triggers: &mut T,
        trigger_name: &str,
        mode: RefreshMode,
    ) -> Result<SyncReport, FetchError>
    where
        S: RowSink,
        T: TriggerHost + Send,
    {
        let start = Instant::now();

        if self.api.base_url.is_empty() {
            let error = FetchError::Config("API base URL is not configured".to_string());
            warn!(error = %error, "Sync aborted");
            return Err(error);
        }

        let required: Vec<&str> = self.required_keys.iter().map(String::as_str).collect();
        let mut records: Vec<Record> = Vec::new();
        let mut attempts = Vec::new();

        for endpoint in &self.api.endpoints {
            let url = format!("{}{}", self.api.base_url, endpoint.path);
            let attempt_start = Instant::now();
            debug!(endpoint = %endpoint.name, url = %url, "Fetching endpoint");

            let payload = match self.fetcher.fetch(&url, &self.api.api_key).await {
                Ok(payload) => payload,
                Err(error) => {
                    warn!(endpoint = %endpoint.name, error = %error, "Endpoint fetch failed");
                    return Err(error);
                }
            };

            if let Err(error) = schema::require_keys(&payload, &required) {
                warn!(endpoint = %endpoint.name, error = %error, "Payload failed validation");
                return Err(error);
            }

            let before = records.len();
            match payload.get("data") {
                Some(Value::Array(items)) => {
                    for item in items {
                        match item {
                            Value::Object(record) => records.push(record.clone()),
                            other => {
                                warn!(
                                    endpoint = %endpoint.name,
                                    value = %other,
                                    "Skipping non-object element in data array"
                                );
                            }
                        }
                    }
                }
                _ => {
                    debug!(endpoint = %endpoint.name, "No data array in payload");
                }
            }

            attempts.push(EndpointAttempt {
                name: endpoint.name.clone(),
                path: endpoint.path.clone(),
                records: records.len() - before,
                duration: attempt_start.elapsed(),
            });
        }

        let rows = if records.is_empty() {
            info!("No records fetched, skipping write");
            0
        } else {
            let table = tabulate(&records);
            match sink.write_rows(&table.rows, mode) {
                Ok(rows) => rows,
                Err(error) => {
                    warn!(error = %error, "Sheet write failed");
                    return Err(error.into());
                }
            }
        };

        if let Err(error) = triggers.ensure(trigger_name).await {
            warn!(error = %error, "Trigger registration failed");
            return Err(error.into());
        }

        let duration = start.elapsed();
        info!(rows, duration_ms = duration.as_millis() as u64, "Sync completed");
        Ok(SyncReport {
            success: true,
            rows,
            mode,
            attempts,
            duration,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
