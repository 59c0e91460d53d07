use super::error::{ProbeError, ProberError};
use super::models::{AggregateReport, ProbeResult, Target};
use crate::configuration::ProberSettings;
use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tokio::time::timeout;

pub struct Prober {
    client: reqwest::Client,
    targets: Vec<Target>,
    timeout: Duration,
}

impl Prober {
    pub fn new(settings: ProberSettings) -> Result<Self, ProberError> {
        if settings.timeout_ms == 0 {
            return Err(ProberError::ZeroTimeout);
        }
        validate_targets(&settings.targets)?;

        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            targets: settings.targets,
            timeout: Duration::from_millis(settings.timeout_ms),
        })
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probes every configured target concurrently.
    pub async fn probe_all(&self) -> AggregateReport {
        self.run_batch(&self.targets).await
    }

    /// Probes an ad-hoc target list with the configured timeout.
    pub async fn probe_targets(&self, targets: &[Target]) -> Result<AggregateReport, ProberError> {
        validate_targets(targets)?;
        Ok(self.run_batch(targets).await)
    }

    async fn run_batch(&self, targets: &[Target]) -> AggregateReport {
        let started = Instant::now();

        // join_all keeps the input order regardless of completion order.
        let results = join_all(targets.iter().map(|target| self.probe_one(target))).await;
        let report = AggregateReport::new(results);

        tracing::info!(
            targets = report.results.len(),
            up = report.results.iter().filter(|r| r.ok).count(),
            overall = %report.overall,
            elapsed_ms = millis(started.elapsed()),
            "Probe batch completed"
        );

        report
    }

    /// Single bounded attempt against one target. Never fails: timeouts and
    /// transport errors are recorded in the returned result.
    #[tracing::instrument(name = "Probe target", skip(self, target), fields(key = %target.key, method = %target.method))]
    pub async fn probe_one(&self, target: &Target) -> ProbeResult {
        let start = Instant::now();
        let request = self
            .client
            .request(target.method.as_reqwest(), target.url.as_str())
            .send();

        // The timer lives inside the `timeout` future and is dropped with it
        // on every path out of this match.
        let outcome = match timeout(self.timeout, request).await {
            Ok(Ok(response)) => Ok(response.status().as_u16()),
            Ok(Err(err)) => Err(ProbeError::from_reqwest(&err)),
            Err(_elapsed) => Err(ProbeError::Timeout),
        };
        let latency_ms = millis(start.elapsed());

        match outcome {
            Ok(status) => {
                let result = ProbeResult::responded(target, status, latency_ms);
                if result.ok {
                    tracing::debug!(status, latency_ms, "Target responded");
                } else {
                    tracing::warn!(status, latency_ms, "Target returned non-success status");
                }
                result
            }
            Err(err) => {
                tracing::warn!(error = %err, latency_ms, "Target probe failed");
                ProbeResult::failed(target, err.to_string(), latency_ms)
            }
        }
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn validate_targets(targets: &[Target]) -> Result<(), ProberError> {
    let mut seen = HashSet::with_capacity(targets.len());

    for target in targets {
        if target.key.is_empty() {
            return Err(ProberError::EmptyKey {
                url: target.url.clone(),
            });
        }
        if !seen.insert(target.key.as_str()) {
            return Err(ProberError::DuplicateKey(target.key.clone()));
        }

        let url = reqwest::Url::parse(&target.url).map_err(|err| ProberError::InvalidUrl {
            key: target.key.clone(),
            reason: err.to_string(),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ProberError::InvalidUrl {
                key: target.key.clone(),
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }
    }

    Ok(())
}
