//! Simulated remote validation service.
//!
//! Stands in for a real backend: every call sleeps for a latency drawn from a
//! configured window, then either echoes the text back, rejects it with one of
//! the configured messages, or fails at the transport level. All randomness
//! comes from an injected generator so runs can be reproduced from a seed.

use std::io;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::validator::{RemoteFailure, RemoteValidator};
use crate::cancel::CancelToken;
use crate::config::RemoteConfig;

/// What the simulated service decided for one call, drawn before sleeping.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Verdict {
    Accept,
    Reject(String),
    Transport,
}

pub struct SimulatedValidator<R = StdRng> {
    config: RemoteConfig,
    rng: Mutex<R>,
}

impl SimulatedValidator<StdRng> {
    /// Build from config, seeding from `config.seed` when present and from
    /// OS entropy otherwise.
    pub fn new(config: RemoteConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn seeded(config: RemoteConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> SimulatedValidator<R> {
    pub fn with_rng(config: RemoteConfig, rng: R) -> Self {
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn draw(&self) -> (Duration, Verdict) {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let (low, high) = (self.config.min_delay_ms, self.config.max_delay_ms);
        let delay_ms = if low >= high {
            low
        } else {
            rng.gen_range(low..=high)
        };

        let roll: f64 = rng.gen();
        let verdict = if roll < self.config.rejection_probability {
            let message = self
                .config
                .rejection_messages
                .choose(&mut *rng)
                .cloned()
                .unwrap_or_else(|| "Invalid input detected".to_string());
            Verdict::Reject(message)
        } else if roll
            < self.config.rejection_probability + self.config.transport_failure_probability
        {
            Verdict::Transport
        } else {
            Verdict::Accept
        };

        (Duration::from_millis(delay_ms), verdict)
    }
}

#[async_trait]
impl<R: Rng + Send> RemoteValidator for SimulatedValidator<R> {
    async fn validate(&self, text: &str, cancel: &CancelToken) -> Result<String, RemoteFailure> {
        if cancel.is_cancelled() {
            return Err(RemoteFailure::Cancelled);
        }

        let (delay, verdict) = self.draw();
        tracing::trace!(
            delay_ms = delay.as_millis() as u64,
            text_length = text.chars().count(),
            "simulated validation started"
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RemoteFailure::Cancelled),
            _ = tokio::time::sleep(delay) => {}
        }

        // A cancel racing the timer wins; nothing below may run for it.
        if cancel.is_cancelled() {
            return Err(RemoteFailure::Cancelled);
        }

        match verdict {
            Verdict::Accept => {
                tracing::debug!("simulated validation accepted input");
                Ok(text.to_string())
            }
            Verdict::Reject(message) => {
                tracing::debug!(%message, "simulated validation rejected input");
                Err(RemoteFailure::Rejected { message })
            }
            Verdict::Transport => {
                tracing::debug!("simulated validation lost its connection");
                Err(RemoteFailure::Transport(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "connection reset by simulated peer",
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn config(rejection_probability: f64, transport_failure_probability: f64) -> RemoteConfig {
        RemoteConfig {
            rejection_probability,
            transport_failure_probability,
            ..RemoteConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepts_and_echoes_text() {
        let validator = SimulatedValidator::seeded(config(0.0, 0.0), 7);
        let result = validator
            .validate("Hello World", &CancelToken::new())
            .await
            .unwrap();
        assert_eq!(result, "Hello World");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejects_with_configured_message() {
        let mut cfg = config(1.0, 0.0);
        cfg.rejection_messages = vec!["Invalid input detected".to_string()];
        let validator = SimulatedValidator::seeded(cfg, 7);

        let err = validator
            .validate("Hello World", &CancelToken::new())
            .await
            .unwrap_err();
        match err {
            RemoteFailure::Rejected { message } => assert_eq!(message, "Invalid input detected"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_is_io_error() {
        let validator = SimulatedValidator::seeded(config(0.0, 1.0), 7);
        let err = validator
            .validate("Hello World", &CancelToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteFailure::Transport(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_stays_inside_window() {
        let mut cfg = config(0.0, 0.0);
        cfg.min_delay_ms = 500;
        cfg.max_delay_ms = 1500;
        let validator = SimulatedValidator::seeded(cfg, 42);

        for _ in 0..10 {
            let start = Instant::now();
            validator.validate("abc", &CancelToken::new()).await.unwrap();
            let elapsed = start.elapsed();
            assert!(elapsed >= Duration::from_millis(500), "{elapsed:?}");
            assert!(elapsed <= Duration::from_millis(1500), "{elapsed:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_window_uses_exact_delay() {
        let mut cfg = config(0.0, 0.0);
        cfg.min_delay_ms = 800;
        cfg.max_delay_ms = 800;
        let validator = SimulatedValidator::seeded(cfg, 1);

        let start = Instant::now();
        validator.validate("abc", &CancelToken::new()).await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_seed_same_verdicts() {
        let run = |seed| async move {
            let validator = SimulatedValidator::seeded(config(0.5, 0.0), seed);
            let mut verdicts = Vec::new();
            for _ in 0..8 {
                let ok = validator
                    .validate("abcdef", &CancelToken::new())
                    .await
                    .is_ok();
                verdicts.push(ok);
            }
            verdicts
        };
        assert_eq!(run(99).await, run(99).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_call() {
        let validator = SimulatedValidator::seeded(config(0.0, 0.0), 7);
        let token = CancelToken::new();
        token.cancel();
        let err = validator.validate("abc", &token).await.unwrap_err();
        assert!(matches!(err, RemoteFailure::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_delay_abandons_call() {
        let mut cfg = config(0.0, 0.0);
        cfg.min_delay_ms = 1000;
        cfg.max_delay_ms = 1000;
        let validator = SimulatedValidator::seeded(cfg, 7);
        let token = CancelToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let start = Instant::now();
        let err = validator.validate("abc", &token).await.unwrap_err();
        assert!(matches!(err, RemoteFailure::Cancelled));
        assert!(start.elapsed() < Duration::from_millis(1000));
    }
}
