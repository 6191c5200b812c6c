//! A process-scoped stale-while-revalidate cache for a single value.
//!
//! A fresh entry is served as-is. A stale entry is served immediately while a
//! refresh runs in the background. When nothing is cached, callers wait for the
//! refresh. At most one refresh is in flight at a time and concurrent callers
//! share it. A failed refresh leaves the previous entry in place.

use super::Clock;
use crate::Result;
use chrono::{DateTime, Utc};
use core::time::Duration;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use ohno::{AppError, app_err};
use std::sync::{Arc, Mutex, PoisonError};

const LOG_TARGET: &str = "       swr";

type Refresh<T> = Shared<BoxFuture<'static, core::result::Result<Arc<T>, Arc<AppError>>>>;

#[derive(Debug)]
struct Entry<T> {
    value: Arc<T>,
    stored_at: DateTime<Utc>,
}

struct State<T> {
    entry: Option<Entry<T>>,
    in_flight: Option<Refresh<T>>,
}

struct Inner<T> {
    key: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    state: Mutex<State<T>>,
}

/// Stale-while-revalidate cache holding one value under a key.
pub struct SwrCache<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for SwrCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> core::fmt::Debug for SwrCache<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SwrCache")
            .field("key", &self.inner.key)
            .field("ttl", &self.inner.ttl)
            .finish_non_exhaustive()
    }
}

impl<T> SwrCache<T>
where
    T: Send + Sync + 'static,
{
    #[must_use]
    pub fn new(key: impl Into<String>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Inner {
                key: key.into(),
                ttl,
                clock,
                state: Mutex::new(State {
                    entry: None,
                    in_flight: None,
                }),
            }),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Store a value as if it had been computed at `stored_at`.
    pub fn seed(&self, value: T, stored_at: DateTime<Utc>) {
        self.inner.lock().entry = Some(Entry {
            value: Arc::new(value),
            stored_at,
        });
    }

    /// The cached value, fresh or stale, without triggering a refresh.
    #[must_use]
    pub fn peek(&self) -> Option<Arc<T>> {
        self.inner.lock().entry.as_ref().map(|e| Arc::clone(&e.value))
    }

    /// Drop the cached value. An in-flight refresh still stores its result.
    pub fn invalidate(&self) {
        self.inner.lock().entry = None;
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.inner.lock().in_flight.is_some()
    }

    /// Get the cached value, refreshing it with `refresh` when it is stale or missing.
    ///
    /// `refresh` is only invoked when no refresh is already in flight.
    ///
    /// # Errors
    ///
    /// Fails only when nothing is cached and the refresh fails.
    pub async fn get_with<F, Fut>(&self, refresh: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (pending, stale) = {
            let mut state = self.inner.lock();
            let now = self.inner.clock.now();

            if let Some(entry) = &state.entry {
                if self.inner.is_fresh(entry, now) {
                    return Ok(Arc::clone(&entry.value));
                }
            }

            let stale = state.entry.as_ref().map(|e| Arc::clone(&e.value));
            let pending = if let Some(in_flight) = &state.in_flight {
                in_flight.clone()
            } else {
                log::debug!(target: LOG_TARGET, "Refreshing '{}'", self.inner.key);
                let started = self.start_refresh(refresh());
                state.in_flight = Some(started.clone());
                started
            };

            (pending, stale)
        };

        if let Some(value) = stale {
            log::debug!(target: LOG_TARGET, "Serving stale '{}' while revalidating", self.inner.key);
            return Ok(value);
        }

        pending
            .await
            .map_err(|e| app_err!("could not compute '{}': {e:#}", self.inner.key))
    }

    fn start_refresh<Fut>(&self, fut: Fut) -> Refresh<T>
    where
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let shared = async move {
            let result = fut.await.map(Arc::new).map_err(Arc::new);
            inner.complete(&result);
            result
        }
        .boxed()
        .shared();

        // run to completion even if every waiting caller goes away
        drop(tokio::spawn(shared.clone()));
        shared
    }
}

impl<T> Inner<T> {
    fn lock(&self) -> std::sync::MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, entry: &Entry<T>, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(entry.stored_at);

        // a timestamp in the future means clock skew, treat it as fresh
        age.to_std().map_or(true, |age| age < self.ttl)
    }

    fn complete(&self, result: &core::result::Result<Arc<T>, Arc<AppError>>) {
        let mut state = self.lock();
        state.in_flight = None;

        match result {
            Ok(value) => {
                log::debug!(target: LOG_TARGET, "Refreshed '{}'", self.key);
                state.entry = Some(Entry {
                    value: Arc::clone(value),
                    stored_at: self.clock.now(),
                });
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not refresh '{}', keeping previous value: {e:#}", self.key);
            }
        }
    }
}
