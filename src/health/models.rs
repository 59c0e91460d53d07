use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
}

impl HttpMethod {
    pub fn as_reqwest(&self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Head => write!(f, "HEAD"),
        }
    }
}

/// An endpoint to be health-checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Target {
    pub key: String,
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
}

impl Target {
    pub fn new(key: &str, label: &str, url: &str, method: HttpMethod) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            url: url.to_string(),
            method,
        }
    }
}

/// Outcome of a single probe. `status` is 0 when no response was received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeResult {
    pub key: String,
    pub label: String,
    pub url: String,
    pub ok: bool,
    pub status: u16,
    #[serde(rename = "latency")]
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn responded(target: &Target, status: u16, latency_ms: u64) -> Self {
        Self {
            key: target.key.clone(),
            label: target.label.clone(),
            url: target.url.clone(),
            ok: (200..300).contains(&status),
            status,
            latency_ms,
            error: None,
        }
    }

    pub fn failed(target: &Target, error: String, latency_ms: u64) -> Self {
        Self {
            key: target.key.clone(),
            label: target.label.clone(),
            url: target.url.clone(),
            ok: false,
            status: 0,
            latency_ms,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Operational,
    Degraded,
    Down,
}

impl OverallStatus {
    /// An empty batch is vacuously operational.
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let up = results.iter().filter(|r| r.ok).count();

        if up == results.len() {
            OverallStatus::Operational
        } else if up > 0 {
            OverallStatus::Degraded
        } else {
            OverallStatus::Down
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallStatus::Operational => write!(f, "operational"),
            OverallStatus::Degraded => write!(f, "degraded"),
            OverallStatus::Down => write!(f, "down"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub updated_at: DateTime<Utc>,
    pub overall: OverallStatus,
    pub results: Vec<ProbeResult>,
}

impl AggregateReport {
    pub fn new(results: Vec<ProbeResult>) -> Self {
        Self {
            updated_at: Utc::now(),
            overall: OverallStatus::from_results(&results),
            results,
        }
    }

    pub fn is_operational(&self) -> bool {
        self.overall == OverallStatus::Operational
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target(key: &str) -> Target {
        Target::new(key, key, "http://example.test/", HttpMethod::Get)
    }

    fn up(key: &str) -> ProbeResult {
        ProbeResult::responded(&target(key), 200, 12)
    }

    fn down(key: &str) -> ProbeResult {
        ProbeResult::failed(&target(key), "timeout".to_string(), 8000)
    }

    #[test]
    fn all_ok_is_operational() {
        assert_eq!(
            OverallStatus::from_results(&[up("a"), up("b")]),
            OverallStatus::Operational
        );
    }

    #[test]
    fn some_ok_is_degraded() {
        assert_eq!(
            OverallStatus::from_results(&[up("a"), down("b"), down("c")]),
            OverallStatus::Degraded
        );
    }

    #[test]
    fn none_ok_is_down() {
        assert_eq!(
            OverallStatus::from_results(&[down("a"), down("b")]),
            OverallStatus::Down
        );
    }

    #[test]
    fn empty_batch_is_operational() {
        let report = AggregateReport::new(vec![]);
        assert!(report.is_operational());
        assert!(report.results.is_empty());
    }

    #[test]
    fn only_2xx_counts_as_ok() {
        let t = target("a");
        assert!(ProbeResult::responded(&t, 200, 1).ok);
        assert!(ProbeResult::responded(&t, 204, 1).ok);
        assert!(ProbeResult::responded(&t, 299, 1).ok);
        assert!(!ProbeResult::responded(&t, 199, 1).ok);
        assert!(!ProbeResult::responded(&t, 301, 1).ok);
        assert!(!ProbeResult::responded(&t, 404, 1).ok);
        assert!(!ProbeResult::responded(&t, 500, 1).ok);
    }

    #[test]
    fn http_failure_carries_no_error_text() {
        let result = ProbeResult::responded(&target("a"), 503, 4);
        assert!(!result.ok);
        assert_eq!(result.status, 503);
        assert!(result.error.is_none());
    }

    #[test]
    fn report_serializes_to_public_shape() {
        let report = AggregateReport::new(vec![up("a"), down("b")]);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["overall"], json!("degraded"));
        assert!(value["updatedAt"].as_str().unwrap().contains('T'));
        assert_eq!(
            value["results"][0],
            json!({
                "key": "a",
                "label": "a",
                "url": "http://example.test/",
                "ok": true,
                "status": 200,
                "latency": 12
            })
        );
        assert_eq!(value["results"][1]["error"], json!("timeout"));
        assert_eq!(value["results"][1]["status"], json!(0));
    }

    #[test]
    fn target_method_defaults_to_get() {
        let t: Target = serde_json::from_value(json!({
            "key": "site",
            "label": "Website",
            "url": "https://example.test/"
        }))
        .unwrap();
        assert_eq!(t.method, HttpMethod::Get);

        let t: Target = serde_json::from_value(json!({
            "key": "app",
            "label": "App",
            "url": "https://example.test/",
            "method": "HEAD"
        }))
        .unwrap();
        assert_eq!(t.method, HttpMethod::Head);
    }
}
