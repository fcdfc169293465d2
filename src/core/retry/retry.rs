use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackoffPolicy {
    Constant,
    Linear,
    Exponential { factor: f32 },
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::Exponential { factor: 2.0 }
    }
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub retry_status_codes: Vec<u16>,
    pub backoff_policy: BackoffPolicy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            retry_status_codes: vec![408, 429, 500, 502, 503, 504],
            backoff_policy: BackoffPolicy::default(),
        }
    }
}

impl RetryConfig {
    /// A config that never retries. Used by the mock scraper and by callers
    /// that prefer to fail fast.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            retry_status_codes: Vec::new(),
            ..Self::default()
        }
    }

    pub fn should_retry(&self, status: u16, retry_count: usize) -> bool {
        retry_count < self.max_retries && self.retry_status_codes.contains(&status)
    }

    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return self.initial_delay;
        }

        let delay = match self.backoff_policy {
            BackoffPolicy::Constant => self.initial_delay,
            BackoffPolicy::Linear => self.initial_delay.mul_f32(attempt as f32),
            BackoffPolicy::Exponential { factor } => {
                self.initial_delay.mul_f32(factor.powi(attempt as i32))
            }
        };

        std::cmp::min(delay, self.max_delay)
    }
}
