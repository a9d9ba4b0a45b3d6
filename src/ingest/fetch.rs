/// Resilient JSON fetcher shared by the rocket and weather utilities.
///
/// Issues a GET with a per-attempt timeout, retrying network failures,
/// timeouts and non-2xx statuses a bounded number of times with a constant
/// delay in between. The first successful response is parsed as JSON and
/// returned immediately. A 2xx body that is not JSON is not retried.

use std::thread;
use std::time::Duration;

use serde_json::Value;

use crate::logging::{self, Source};
use crate::model::FetchError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("rocket_specs_service/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Retry policy
// ---------------------------------------------------------------------------

/// Attempt budget and timing for one fetch. Delay is constant, not exponential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub timeout: Duration,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// A single blocking HTTP GET returning the body of a 2xx response.
///
/// Implemented for `reqwest::blocking::Client`; tests supply scripted
/// endpoints instead.
pub trait HttpGet {
    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

impl HttpGet for reqwest::blocking::Client {
    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self
            .get(url)
            .header("Accept", "application/json")
            .timeout(timeout)
            .send()
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        response.text().map_err(request_error)
    }
}

fn request_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else {
        FetchError::Request(err.to_string())
    }
}

/// Builds the blocking client used by both utilities.
pub fn build_client() -> Result<reqwest::blocking::Client, FetchError> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(request_error)
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// One failed attempt, numbered from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptFailure {
    pub attempt: u32,
    pub error: FetchError,
}

/// A successfully parsed payload plus the attempts that failed before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub payload: Value,
    pub failures: Vec<AttemptFailure>,
}

/// Fetch `url` and parse it as JSON under `policy`.
///
/// Each failed attempt is logged with its index; exhaustion is logged once
/// and returned as `FetchError::Exhausted`. There is no sleep after the last
/// attempt.
pub fn fetch_json<C: HttpGet + ?Sized>(
    client: &C,
    url: &str,
    policy: &RetryPolicy,
    source: Source,
) -> Result<Fetched, FetchError> {
    let mut failures = Vec::new();

    for attempt in 1..=policy.max_attempts {
        match client.get_text(url, policy.timeout) {
            Ok(body) => {
                let payload = serde_json::from_str(&body).map_err(|e| {
                    let err = FetchError::InvalidJson(e.to_string());
                    logging::error(source, Some(url), &err.to_string());
                    err
                })?;

                if !failures.is_empty() {
                    logging::info(
                        source,
                        Some(url),
                        &format!("Fetched after {} failed attempt(s)", failures.len()),
                    );
                }
                return Ok(Fetched { payload, failures });
            }
            Err(err) => {
                logging::log_attempt_failure(source, url, attempt, policy.max_attempts, &err);
                failures.push(AttemptFailure { attempt, error: err });

                if attempt < policy.max_attempts && !policy.delay.is_zero() {
                    thread::sleep(policy.delay);
                }
            }
        }
    }

    let last_error = failures
        .last()
        .map(|f| f.error.to_string())
        .unwrap_or_else(|| "no attempts made".to_string());

    let exhausted = FetchError::Exhausted {
        url: url.to_string(),
        attempts: policy.max_attempts,
        last_error,
    };
    logging::error(source, Some(url), &format!("{}. Check API connectivity.", exhausted));
    Err(exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::time::Instant;

    /// Replays a fixed script of responses, one per call.
    struct ScriptedEndpoint {
        responses: RefCell<Vec<Result<String, FetchError>>>,
        calls: Cell<u32>,
    }

    impl ScriptedEndpoint {
        fn new(mut responses: Vec<Result<String, FetchError>>) -> Self {
            responses.reverse();
            Self { responses: RefCell::new(responses), calls: Cell::new(0) }
        }
    }

    impl HttpGet for ScriptedEndpoint {
        fn get_text(&self, _url: &str, _timeout: Duration) -> Result<String, FetchError> {
            self.calls.set(self.calls.get() + 1);
            self.responses
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(FetchError::Request("script exhausted".into())))
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::default().with_delay(Duration::ZERO)
    }

    #[test]
    fn test_default_policy_matches_documented_budget() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.timeout, Duration::from_secs(5));
        assert_eq!(policy.delay, Duration::from_secs(2));
    }

    #[test]
    fn test_first_success_short_circuits() {
        let endpoint = ScriptedEndpoint::new(vec![Ok(r#"[{"name": "Falcon 9"}]"#.into())]);
        let fetched = fetch_json(&endpoint, "http://test/rockets", &fast_policy(), Source::SpaceX).unwrap();

        assert_eq!(endpoint.calls.get(), 1);
        assert!(fetched.failures.is_empty());
        assert_eq!(fetched.payload[0]["name"], "Falcon 9");
    }

    #[test]
    fn test_two_failures_then_success_records_two_failures() {
        let endpoint = ScriptedEndpoint::new(vec![
            Err(FetchError::HttpStatus(503)),
            Err(FetchError::Timeout("timed out".into())),
            Ok(r#"{"ok": true}"#.into()),
        ]);
        let fetched = fetch_json(&endpoint, "http://test", &fast_policy(), Source::SpaceX).unwrap();

        assert_eq!(endpoint.calls.get(), 3);
        assert_eq!(fetched.failures.len(), 2, "exactly two failed attempts should be recorded");
        assert_eq!(fetched.failures[0].attempt, 1);
        assert_eq!(fetched.failures[1].attempt, 2);
        assert_eq!(fetched.payload["ok"], true);
    }

    #[test]
    fn test_always_failing_endpoint_exhausts_budget() {
        let endpoint = ScriptedEndpoint::new(vec![
            Err(FetchError::HttpStatus(500)),
            Err(FetchError::HttpStatus(500)),
            Err(FetchError::HttpStatus(500)),
            Ok("{}".into()),
        ]);
        let err = fetch_json(&endpoint, "http://test", &fast_policy(), Source::SpaceX).unwrap_err();

        assert_eq!(endpoint.calls.get(), 3, "must stop after max_attempts");
        match err {
            FetchError::Exhausted { attempts, last_error, .. } => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("500"));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    /// Always fails, recording when each request arrived.
    struct FailingEndpoint {
        arrivals: RefCell<Vec<Instant>>,
    }

    impl HttpGet for FailingEndpoint {
        fn get_text(&self, _url: &str, _timeout: Duration) -> Result<String, FetchError> {
            self.arrivals.borrow_mut().push(Instant::now());
            Err(FetchError::HttpStatus(503))
        }
    }

    #[test]
    fn test_delay_is_constant_and_skipped_after_last_attempt() {
        let delay = Duration::from_millis(100);
        let endpoint = FailingEndpoint { arrivals: RefCell::new(Vec::new()) };
        let policy = RetryPolicy::default().with_delay(delay);

        let started = Instant::now();
        let err = fetch_json(&endpoint, "http://test", &policy, Source::SpaceX).unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, FetchError::Exhausted { attempts: 3, .. }));
        let arrivals = endpoint.arrivals.borrow();
        assert_eq!(arrivals.len(), 3);
        for gap in arrivals.windows(2).map(|w| w[1] - w[0]) {
            assert!(gap >= delay, "attempts should be at least one delay apart, got {:?}", gap);
            assert!(gap < delay * 3 / 2, "delay should not grow between attempts, got {:?}", gap);
        }
        assert!(elapsed >= delay * 2, "expected two delays, got {:?}", elapsed);
        assert!(elapsed < delay * 3, "no delay should follow the final attempt, got {:?}", elapsed);
    }

    #[test]
    fn test_custom_attempt_budget_is_respected() {
        let endpoint = ScriptedEndpoint::new(vec![]);
        let policy = fast_policy().with_max_attempts(5);
        let err = fetch_json(&endpoint, "http://test", &policy, Source::OpenMeteo).unwrap_err();

        assert_eq!(endpoint.calls.get(), 5);
        assert!(matches!(err, FetchError::Exhausted { attempts: 5, .. }));
    }

    #[test]
    fn test_zero_attempts_is_immediately_exhausted() {
        let endpoint = ScriptedEndpoint::new(vec![Ok("{}".into())]);
        let policy = fast_policy().with_max_attempts(0);
        let err = fetch_json(&endpoint, "http://test", &policy, Source::SpaceX).unwrap_err();

        assert_eq!(endpoint.calls.get(), 0);
        assert!(matches!(err, FetchError::Exhausted { attempts: 0, .. }));
    }

    #[test]
    fn test_malformed_success_body_is_not_retried() {
        let endpoint = ScriptedEndpoint::new(vec![Ok("<html>oops</html>".into()), Ok("{}".into())]);
        let err = fetch_json(&endpoint, "http://test", &fast_policy(), Source::SpaceX).unwrap_err();

        assert_eq!(endpoint.calls.get(), 1);
        assert!(matches!(err, FetchError::InvalidJson(_)));
    }
}
