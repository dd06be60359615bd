//! Prometheus registry backing `/metrics`.
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct ApiMetrics {
    registry: Registry,
    requests: IntCounterVec,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new("pipewatch_http_requests_total", "HTTP requests served, by route and status"),
            &["path", "status"],
        )?;
        registry.register(Box::new(requests.clone()))?;
        Ok(Self { registry, requests })
    }

    pub fn record_request(&self, path: &str, status: u16) {
        let status = status.to_string();
        self.requests.with_label_values(&[path, status.as_str()]).inc();
    }

    pub fn requests_for(&self, path: &str, status: u16) -> u64 {
        let status = status.to_string();
        self.requests.with_label_values(&[path, status.as_str()]).get()
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_encode() {
        let metrics = ApiMetrics::new().unwrap();
        metrics.record_request("/api/alerts", 200);
        metrics.record_request("/api/alerts", 200);
        metrics.record_request("unmatched", 404);

        assert_eq!(metrics.requests_for("/api/alerts", 200), 2);
        assert_eq!(metrics.requests_for("unmatched", 404), 1);

        let text = metrics.encode().unwrap();
        assert!(text.contains("pipewatch_http_requests_total"));
        assert!(text.contains("path=\"/api/alerts\""));
    }

    #[test]
    fn test_registries_are_independent() {
        let a = ApiMetrics::new().unwrap();
        let b = ApiMetrics::new().unwrap();
        a.record_request("/api/metrics", 200);
        assert_eq!(b.requests_for("/api/metrics", 200), 0);
    }
}
