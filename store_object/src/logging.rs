//! Query logging
//!
//! [`LoggedQuery`] wraps any query and reports its start, success and failure through
//! `tracing`. The wrapped query's output and error are passed through untouched, so a
//! logged query commits and rolls back exactly like the bare one.

use crate::errors::{cause_chain, PersistenceError};
use crate::query::Query;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;
use tracing::Level;

/// Severity of a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A level name that is none of error, warn(ing), info or debug
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level `{0}`")]
pub struct ParseLogLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

/// `tracing` needs the level at the callsite, hence one arm per level
macro_rules! event_at {
    ($level:expr, $($field:tt)*) => {
        match $level {
            LogLevel::Error => tracing::error!($($field)*),
            LogLevel::Warn => tracing::warn!($($field)*),
            LogLevel::Info => tracing::info!($($field)*),
            LogLevel::Debug => tracing::debug!($($field)*),
        }
    };
}

/// Decorator that logs around another query
#[derive(Debug, Clone)]
pub struct LoggedQuery<Q> {
    inner: Q,
    level: LogLevel,
}

impl<Q> LoggedQuery<Q> {
    /// Log successes at `debug`
    pub fn new(inner: Q) -> Self {
        Self::with_level(inner, LogLevel::Debug)
    }

    /// Log successes at `level`; failures are always logged at `error`
    pub fn with_level(inner: Q, level: LogLevel) -> Self {
        Self { inner, level }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn inner(&self) -> &Q {
        &self.inner
    }

    pub fn into_inner(self) -> Q {
        self.inner
    }
}

#[async_trait]
impl<C, Q> Query<C> for LoggedQuery<Q>
where
    C: Send,
    Q: Query<C>,
{
    type Output = Q::Output;

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn execute(&self, ctx: &mut C) -> Result<Self::Output, PersistenceError> {
        let query = self.inner.name();
        tracing::debug!(query, "query started");
        let started = Instant::now();

        match self.inner.execute(ctx).await {
            Ok(output) => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                event_at!(self.level, query, elapsed_ms, "query succeeded");
                Ok(output)
            }
            Err(err) => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                tracing::error!(
                    query,
                    elapsed_ms,
                    error = %cause_chain(&err),
                    "query failed"
                );
                Err(err)
            }
        }
    }
}

/// Builder methods for wrapping any query in a [`LoggedQuery`]
pub trait QueryExt<C: Send>: Query<C> + Sized {
    fn logged(self) -> LoggedQuery<Self> {
        LoggedQuery::new(self)
    }

    fn logged_at(self, level: LogLevel) -> LoggedQuery<Self> {
        LoggedQuery::with_level(self, level)
    }
}

impl<C: Send, Q: Query<C>> QueryExt<C> for Q {}
