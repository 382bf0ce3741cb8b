//! Entry points and configuration.
//!
//! [`Parjson`] offers one-shot helpers that build a private pool, run a single
//! encode or decode, and release the pool. Callers that encode or decode
//! repeatedly should keep an [`Encoder`] / [`Decoder`] around instead, built
//! through [`Parjson::builder`].

use std::env;
use std::num::NonZeroUsize;
use std::thread;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{ParjsonError, Result};
use crate::model::User;

/// Environment variable read by [`ParjsonOptions::from_env`].
pub const WORKERS_ENV: &str = "PARJSON_WORKERS";

/// Default worker thread name prefix.
pub const DEFAULT_THREAD_NAME: &str = "parjson-worker";

/// The main entry point.
#[derive(Debug)]
pub struct Parjson;

impl Parjson {
    /// Starts a configuration builder.
    pub fn builder() -> ParjsonOptions {
        ParjsonOptions::new()
    }

    /// Encodes `user` with a pool sized to the available parallelism.
    pub fn encode(user: &User) -> Result<String> {
        let encoder = Self::builder().encoder()?;
        let text = encoder.encode(user);
        encoder.shutdown();
        text
    }

    /// Decodes `text` with a pool sized to the available parallelism.
    pub fn decode(text: &str) -> Result<User> {
        let decoder = Self::builder().decoder()?;
        let user = decoder.decode(text);
        decoder.shutdown();
        user
    }
}

/// Configuration for encoder and decoder instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParjsonOptions {
    workers: Option<usize>,
    thread_name: String,
}

impl Default for ParjsonOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ParjsonOptions {
    /// Defaults: one worker per hardware thread, named `parjson-worker-N`.
    pub fn new() -> Self {
        Self {
            workers: None,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
        }
    }

    /// Defaults overridden by [`WORKERS_ENV`] when it is set.
    pub fn from_env() -> Result<Self> {
        let options = Self::new();
        match env::var(WORKERS_ENV) {
            Ok(raw) => {
                let workers = raw.trim().parse::<usize>().map_err(|e| {
                    ParjsonError::Config(format!("{WORKERS_ENV}={raw:?} is not a worker count: {e}"))
                })?;
                if workers == 0 {
                    return Err(ParjsonError::Config(format!(
                        "{WORKERS_ENV} must be at least 1"
                    )));
                }
                Ok(options.workers(workers))
            }
            Err(env::VarError::NotPresent) => Ok(options),
            Err(e) => Err(ParjsonError::Config(format!("{WORKERS_ENV}: {e}"))),
        }
    }

    /// Fixes the number of worker threads per instance.
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the worker thread name prefix.
    #[must_use]
    pub fn thread_name(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name = prefix.into();
        self
    }

    /// The resolved worker count.
    ///
    /// Fails with [`ParjsonError::Config`] if zero workers were requested.
    pub fn worker_count(&self) -> Result<usize> {
        match self.workers {
            Some(0) => Err(ParjsonError::Config(
                "a task pool needs at least one worker".into(),
            )),
            Some(n) => Ok(n),
            None => Ok(available_parallelism()),
        }
    }

    /// The worker thread name prefix.
    pub fn thread_name_prefix(&self) -> &str {
        &self.thread_name
    }

    /// Builds an encoder owning a private pool.
    pub fn encoder(&self) -> Result<Encoder> {
        Encoder::with_options(self)
    }

    /// Builds a decoder owning a private pool.
    pub fn decoder(&self) -> Result<Decoder> {
        Decoder::with_options(self)
    }
}

/// Number of hardware execution units, or 1 if it cannot be determined.
pub fn available_parallelism() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}
