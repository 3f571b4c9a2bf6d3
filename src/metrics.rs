//! Fetch metrics collection and reporting
//!
//! Tracks latency histograms and success rates per remote resource kind.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::RwLock;

/// Maximum number of samples to keep per resource
const MAX_SAMPLES: usize = 100;

/// The three remote read paths the tracker exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Listing,
    Detail,
    History,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Listing => "listing",
            ResourceKind::Detail => "detail",
            ResourceKind::History => "history",
        }
    }
}

/// Computed metrics for one resource kind
#[derive(Debug, Clone)]
pub struct ResourceMetrics {
    pub resource: ResourceKind,
    /// 50th percentile latency in milliseconds
    pub latency_p50_ms: f64,
    /// 99th percentile latency in milliseconds
    pub latency_p99_ms: f64,
    /// Success rate (0.0 to 1.0)
    pub success_rate: f64,
    /// Total number of requests tracked
    pub total_requests: u64,
    /// Number of failed requests
    pub failed_requests: u64,
}

impl ResourceMetrics {
    /// Creates metrics with no data
    fn empty(resource: ResourceKind) -> Self {
        Self {
            resource,
            latency_p50_ms: 0.0,
            latency_p99_ms: 0.0,
            success_rate: 1.0,
            total_requests: 0,
            failed_requests: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct LatencySample {
    duration_ms: f64,
    success: bool,
}

#[derive(Debug, Default)]
struct ResourceWindow {
    samples: VecDeque<LatencySample>,
    total_requests: u64,
    failed_requests: u64,
}

/// Collects and computes per-resource fetch metrics
#[derive(Default)]
pub struct MetricsCollector {
    windows: RwLock<HashMap<ResourceKind, ResourceWindow>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request with its duration and success status
    pub async fn record_request(&self, resource: ResourceKind, duration: Duration, success: bool) {
        let mut windows = self.windows.write().await;
        let window = windows.entry(resource).or_default();

        window.total_requests += 1;
        if !success {
            window.failed_requests += 1;
        }

        if window.samples.len() >= MAX_SAMPLES {
            window.samples.pop_front();
        }
        window.samples.push_back(LatencySample {
            duration_ms: duration.as_secs_f64() * 1000.0,
            success,
        });
    }

    /// Computes current metrics for one resource kind
    pub async fn metrics_for(&self, resource: ResourceKind) -> ResourceMetrics {
        let windows = self.windows.read().await;
        let Some(window) = windows.get(&resource) else {
            return ResourceMetrics::empty(resource);
        };
        if window.samples.is_empty() {
            return ResourceMetrics::empty(resource);
        }

        let mut latencies: Vec<f64> = window
            .samples
            .iter()
            .filter(|s| s.success)
            .map(|s| s.duration_ms)
            .collect();
        latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let success_rate = if window.total_requests > 0 {
            (window.total_requests - window.failed_requests) as f64 / window.total_requests as f64
        } else {
            1.0
        };

        ResourceMetrics {
            resource,
            latency_p50_ms: percentile(&latencies, 50.0),
            latency_p99_ms: percentile(&latencies, 99.0),
            success_rate,
            total_requests: window.total_requests,
            failed_requests: window.failed_requests,
        }
    }

    /// Computes current metrics for every resource kind
    pub async fn all_metrics(&self) -> Vec<ResourceMetrics> {
        let mut result = Vec::new();
        for resource in [ResourceKind::Listing, ResourceKind::Detail, ResourceKind::History] {
            result.push(self.metrics_for(resource).await);
        }
        result
    }
}

/// Calculate percentile from sorted values
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted_values.len() - 1) as f64).round() as usize;
    sorted_values[idx.min(sorted_values.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_per_resource_windows() {
        let collector = MetricsCollector::new();

        collector
            .record_request(ResourceKind::Listing, Duration::from_millis(100), true)
            .await;
        collector
            .record_request(ResourceKind::Listing, Duration::from_millis(200), true)
            .await;
        collector
            .record_request(ResourceKind::Listing, Duration::from_millis(150), false)
            .await;
        collector
            .record_request(ResourceKind::Detail, Duration::from_millis(50), true)
            .await;

        let listing = collector.metrics_for(ResourceKind::Listing).await;
        assert_eq!(listing.total_requests, 3);
        assert_eq!(listing.failed_requests, 1);
        assert!(listing.success_rate > 0.6 && listing.success_rate < 0.7);

        let detail = collector.metrics_for(ResourceKind::Detail).await;
        assert_eq!(detail.total_requests, 1);
        assert_eq!(detail.failed_requests, 0);

        let history = collector.metrics_for(ResourceKind::History).await;
        assert_eq!(history.total_requests, 0);
        assert_eq!(history.success_rate, 1.0);
    }

    #[test]
    fn percentile_of_sorted_values() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(percentile(&values, 50.0), 5.0);
        assert_eq!(percentile(&values, 99.0), 10.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }
}
