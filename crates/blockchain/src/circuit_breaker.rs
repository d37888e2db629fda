use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Calls flow normally
    Closed,
    /// Calls are rejected until the cool-down elapses
    Open,
    /// Probing whether the endpoint recovered
    HalfOpen,
}

#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit
    pub failure_threshold: u32,
    /// Successes in half-open state needed to close it again
    pub success_threshold: u32,
    /// How long the circuit stays open before probing
    pub timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 2,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    consecutive_failures: u32,
    half_open_successes: u32,
    opened_at: Option<Instant>,
}

/// Per-endpoint circuit breaker guarding an RPC URL
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        let name = name.into();
        debug!(
            "Circuit breaker '{}': failure_threshold={}, success_threshold={}, timeout={:?}",
            name, config.failure_threshold, config.success_threshold, config.timeout
        );

        Self {
            name,
            config,
            inner: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                half_open_successes: 0,
                opened_at: None,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    /// Whether a call may go through now. Moves an expired open circuit to half-open.
    pub fn is_request_allowed(&self) -> bool {
        let mut inner = self.lock();

        match inner.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let cooled_down = inner
                    .opened_at
                    .map(|opened| opened.elapsed() >= self.config.timeout)
                    .unwrap_or(true);

                if cooled_down {
                    info!("Circuit breaker '{}': open -> half-open", self.name);
                    inner.state = CircuitState::HalfOpen;
                    inner.half_open_successes = 0;
                }
                cooled_down
            }
        }
    }

    pub fn record_success(&self) {
        let mut inner = self.lock();
        inner.consecutive_failures = 0;

        if inner.state == CircuitState::HalfOpen {
            inner.half_open_successes += 1;
            if inner.half_open_successes >= self.config.success_threshold {
                info!("Circuit breaker '{}': half-open -> closed", self.name);
                inner.state = CircuitState::Closed;
                inner.opened_at = None;
            }
        }
    }

    pub fn record_failure(&self) {
        let mut inner = self.lock();
        inner.consecutive_failures += 1;

        let trip = match inner.state {
            CircuitState::HalfOpen => true,
            CircuitState::Closed => inner.consecutive_failures >= self.config.failure_threshold,
            CircuitState::Open => false,
        };

        if trip {
            warn!(
                "Circuit breaker '{}': opening after {} consecutive failures",
                self.name, inner.consecutive_failures
            );
            inner.state = CircuitState::Open;
            inner.opened_at = Some(Instant::now());
            inner.half_open_successes = 0;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BreakerState> {
        // State stays consistent even if a holder panicked mid-update
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(timeout: Duration) -> CircuitBreaker {
        CircuitBreaker::new(
            "test-rpc",
            CircuitBreakerConfig {
                failure_threshold: 3,
                success_threshold: 2,
                timeout,
            },
        )
    }

    #[test]
    fn test_starts_closed() {
        let cb = breaker(Duration::from_secs(30));
        assert_eq!(cb.state(), CircuitState::Closed);
        assert!(cb.is_request_allowed());
    }

    #[test]
    fn test_opens_after_threshold() {
        let cb = breaker(Duration::from_secs(30));
        cb.record_failure();
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Closed);

        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(!cb.is_request_allowed());
    }

    #[test]
    fn test_success_resets_failure_streak() {
        let cb = breaker(Duration::from_secs(30));
        cb.record_failure();
        cb.record_failure();
        cb.record_success();
        cb.record_failure();
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[test]
    fn test_half_open_then_closed() {
        let cb = breaker(Duration::ZERO);
        for _ in 0..3 {
            cb.record_failure();
        }
        assert_eq!(cb.state(), CircuitState::Open);

        assert!(cb.is_request_allowed());
        assert_eq!(cb.state(), CircuitState::HalfOpen);

        cb.record_success();
        assert_eq!(cb.state(), CircuitState::HalfOpen);
        cb.record_success();
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[test]
    fn test_half_open_failure_reopens() {
        let cb = breaker(Duration::ZERO);
        for _ in 0..3 {
            cb.record_failure();
        }
        assert!(cb.is_request_allowed());
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
    }
}
