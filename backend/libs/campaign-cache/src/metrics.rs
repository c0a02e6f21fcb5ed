//! Cache metrics for observability

use prometheus::{CounterVec, Opts, Registry};
use std::sync::OnceLock;

use crate::CacheScope;

static METRICS: OnceLock<CacheMetricsInner> = OnceLock::new();

struct CacheMetricsInner {
    hits: CounterVec,
    misses: CounterVec,
    writes: CounterVec,
    invalidations: CounterVec,
    errors: CounterVec,
}

impl CacheMetricsInner {
    fn new() -> Self {
        Self {
            hits: CounterVec::new(
                Opts::new("campaign_cache_hits_total", "Total cache hits"),
                &["scope"],
            )
            .expect("valid metric definition"),
            misses: CounterVec::new(
                Opts::new(
                    "campaign_cache_misses_total",
                    "Total cache misses, labelled by reason",
                ),
                &["scope", "reason"],
            )
            .expect("valid metric definition"),
            writes: CounterVec::new(
                Opts::new("campaign_cache_writes_total", "Total cache writes"),
                &["scope"],
            )
            .expect("valid metric definition"),
            invalidations: CounterVec::new(
                Opts::new(
                    "campaign_cache_invalidations_total",
                    "Total explicit cache invalidations",
                ),
                &["scope"],
            )
            .expect("valid metric definition"),
            errors: CounterVec::new(
                Opts::new("campaign_cache_errors_total", "Total cache errors"),
                &["scope", "error_type"],
            )
            .expect("valid metric definition"),
        }
    }

    fn register(&self, registry: &Registry) -> Result<(), prometheus::Error> {
        registry.register(Box::new(self.hits.clone()))?;
        registry.register(Box::new(self.misses.clone()))?;
        registry.register(Box::new(self.writes.clone()))?;
        registry.register(Box::new(self.invalidations.clone()))?;
        registry.register(Box::new(self.errors.clone()))?;
        Ok(())
    }
}

fn get_metrics() -> &'static CacheMetricsInner {
    METRICS.get_or_init(CacheMetricsInner::new)
}

/// Why a read did not produce a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    Absent,
    Expired,
    Stale,
    Empty,
    Undecodable,
    StoreError,
}

impl MissReason {
    fn as_str(&self) -> &'static str {
        match self {
            MissReason::Absent => "absent",
            MissReason::Expired => "expired",
            MissReason::Stale => "stale",
            MissReason::Empty => "empty",
            MissReason::Undecodable => "undecodable",
            MissReason::StoreError => "store_error",
        }
    }
}

/// Cache metrics wrapper
#[derive(Clone, Debug, Default)]
pub struct CacheMetrics;

impl CacheMetrics {
    pub fn new() -> Self {
        Self
    }

    /// Register metrics with a Prometheus registry
    pub fn register(registry: &Registry) -> Result<(), prometheus::Error> {
        get_metrics().register(registry)
    }

    pub fn record_hit(&self, scope: CacheScope) {
        get_metrics().hits.with_label_values(&[scope.as_str()]).inc();
    }

    pub fn record_miss(&self, scope: CacheScope, reason: MissReason) {
        get_metrics()
            .misses
            .with_label_values(&[scope.as_str(), reason.as_str()])
            .inc();
    }

    pub fn record_write(&self, scope: CacheScope) {
        get_metrics().writes.with_label_values(&[scope.as_str()]).inc();
    }

    pub fn record_invalidation(&self, scope: CacheScope) {
        get_metrics()
            .invalidations
            .with_label_values(&[scope.as_str()])
            .inc();
    }

    pub fn record_error(&self, scope: CacheScope, error_type: &str) {
        get_metrics()
            .errors
            .with_label_values(&[scope.as_str(), error_type])
            .inc();
    }

    pub fn hit_count(&self, scope: CacheScope) -> f64 {
        get_metrics().hits.with_label_values(&[scope.as_str()]).get()
    }

    pub fn miss_count(&self, scope: CacheScope, reason: MissReason) -> f64 {
        get_metrics()
            .misses
            .with_label_values(&[scope.as_str(), reason.as_str()])
            .get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_with_fresh_registry() {
        let registry = Registry::new();
        CacheMetrics::register(&registry).unwrap();
        // Registering the same collectors twice is rejected by prometheus
        assert!(CacheMetrics::register(&registry).is_err());
    }

    #[test]
    fn test_hit_counter_increments() {
        let metrics = CacheMetrics::new();
        let before = metrics.hit_count(CacheScope::CampaignCharacters);
        metrics.record_hit(CacheScope::CampaignCharacters);
        assert!(metrics.hit_count(CacheScope::CampaignCharacters) >= before + 1.0);
    }
}
