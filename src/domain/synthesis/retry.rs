use std::fmt;
use std::future::Future;

/// Upper bound on how many times an operation is attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// A policy of zero attempts is raised to one.
    pub const fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
        }
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// Every attempt failed. Carries the error from the final attempt.
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

impl<E: fmt::Display> fmt::Display for RetryExhausted<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.last_error)
    }
}

impl<E> std::error::Error for RetryExhausted<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last_error)
    }
}

/// Run `operation` until it succeeds or the policy's attempts are used up.
///
/// Attempts run back to back with no delay, and a new attempt only starts
/// after the previous future has resolved. `on_failure` receives the 1-based
/// attempt index of every failed attempt, including the last one.
pub async fn retry<T, E, F, Fut, O>(
    policy: RetryPolicy,
    mut operation: F,
    mut on_failure: O,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    O: FnMut(u32, &E),
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                on_failure(attempt, &error);
                if attempt >= policy.max_attempts {
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last_error: error,
                    });
                }
                attempt += 1;
            }
        }
    }
}
