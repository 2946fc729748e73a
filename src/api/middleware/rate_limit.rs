//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::config::RateLimit;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Replenish interval of one token, in nanoseconds.
fn replenish_interval_ns(limit: RateLimit) -> u64 {
    (NANOS_PER_SECOND / limit.per_second.max(1)).max(1)
}

/// Creates a per-IP rate limiter keyed on the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
/// Requires the router to be served with connect info
/// (`into_make_service_with_connect_info::<SocketAddr>`).
///
/// # Errors
///
/// Returns an error if `burst` is zero.
pub fn peer_layer(
    limit: RateLimit,
) -> Result<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_nanosecond(replenish_interval_ns(limit))
        .burst_size(limit.burst)
        .finish()
        .context("Invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Creates a per-IP rate limiter for deployments behind a reverse proxy.
///
/// The client IP is read from `X-Forwarded-For`, `X-Real-IP` or
/// `Forwarded`, falling back to the peer address. Only safe when the proxy
/// overwrites those headers.
///
/// # Errors
///
/// Returns an error if `burst` is zero.
pub fn proxied_layer(
    limit: RateLimit,
) -> Result<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_nanosecond(replenish_interval_ns(limit))
        .burst_size(limit.burst)
        .finish()
        .context("Invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replenish_interval() {
        let limit = |per_second| RateLimit {
            per_second,
            burst: 10,
        };

        assert_eq!(replenish_interval_ns(limit(1)), 1_000_000_000);
        assert_eq!(replenish_interval_ns(limit(50)), 20_000_000);
        assert_eq!(replenish_interval_ns(limit(5000)), 200_000);
    }

    #[test]
    fn test_replenish_interval_keeps_configured_rate() {
        for per_second in [300, 1500, 7000] {
            let interval = replenish_interval_ns(RateLimit {
                per_second,
                burst: 10,
            });
            let effective = NANOS_PER_SECOND as f64 / interval as f64;

            assert!((effective - per_second as f64).abs() < 0.01 * per_second as f64);
        }
    }

    #[test]
    fn test_zero_burst_is_rejected() {
        let limit = RateLimit {
            per_second: 10,
            burst: 0,
        };

        assert!(peer_layer(limit).is_err());
        assert!(proxied_layer(limit).is_err());
    }
}
