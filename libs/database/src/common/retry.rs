use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse};

/// Backoff schedule for opening the connection pool at startup.
///
/// Only connection setup is retried; stored-procedure calls never are.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Attempts after the first failure before giving up
    pub max_retries: u32,
    /// Wait before the first retry
    pub initial_delay: Duration,
    /// Ceiling for any single wait
    pub max_delay: Duration,
    /// Growth factor applied after each failed attempt
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Wait before retry number `retry` (1-based), capped at `max_delay`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self
            .backoff_multiplier
            .powi(retry.saturating_sub(1) as i32);
        self.initial_delay.mul_f64(factor).min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

#[cfg(feature = "config")]
impl FromEnv for RetryConfig {
    /// - DB_CONNECT_MAX_RETRIES: defaults to 5
    /// - DB_CONNECT_RETRY_DELAY_MS: first wait, defaults to 200
    /// - DB_CONNECT_MAX_DELAY_MS: defaults to 5000
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            max_retries: env_parse("DB_CONNECT_MAX_RETRIES", "5")?,
            initial_delay: Duration::from_millis(env_parse("DB_CONNECT_RETRY_DELAY_MS", "200")?),
            max_delay: Duration::from_millis(env_parse("DB_CONNECT_MAX_DELAY_MS", "5000")?),
            ..Self::default()
        })
    }
}

/// Keep calling `connect` until it succeeds or the retries run out.
///
/// `target` names what is being connected to in the logs.
///
/// ```ignore
/// let db = retry_connect("PostgreSQL", || connect_with_options(options.clone()), RetryConfig::default()).await?;
/// ```
pub async fn retry_connect<F, Fut, T, E>(target: &str, mut connect: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retry = 0;

    loop {
        match connect().await {
            Ok(connection) => {
                if retry > 0 {
                    info!(target_name = target, retries = retry, "Connected after retrying");
                }
                return Ok(connection);
            }
            Err(e) if retry >= config.max_retries => {
                warn!(target_name = target, attempts = retry + 1, error = %e, "Giving up connecting");
                return Err(e);
            }
            Err(e) => {
                retry += 1;
                let delay = config.delay_for(retry);
                warn!(
                    target_name = target,
                    attempt = retry,
                    max_retries = config.max_retries,
                    error = %e,
                    "Connection failed, retrying in {:?}",
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
