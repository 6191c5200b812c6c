//! On-disk snapshot of the last good value of a cache.
//!
//! A [`Snapshot`] is a timestamped JSON envelope used to warm a cache on start.
//! Loading never fails: a missing or corrupt snapshot is simply absent.

use crate::Result;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "  snapshot";

/// On-disk representation of a snapshot.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Envelope<T> {
    timestamp: DateTime<Utc>,
    payload: T,
}

/// A single JSON snapshot file.
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    #[must_use]
    pub fn new(cache_dir: &Path, filename: &str) -> Self {
        Self {
            path: cache_dir.join(filename),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored value and when it was stored.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self) -> Option<(T, DateTime<Utc>)> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "No snapshot at '{}': {e:#}", self.path.display());
                return None;
            }
        };

        match serde_json::from_reader::<_, Envelope<T>>(BufReader::new(file)) {
            Ok(envelope) => {
                log::debug!(target: LOG_TARGET, "Loaded snapshot '{}' from {}", self.path.display(), envelope.timestamp);
                Some((envelope.payload, envelope.timestamp))
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Ignoring unreadable snapshot '{}': {e:#}", self.path.display());
                None
            }
        }
    }

    /// Replace the stored value.
    ///
    /// The envelope is written next to the snapshot and renamed over it, so readers
    /// never see a partial file.
    pub fn save<T: Serialize>(&self, payload: &T, timestamp: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).into_app_err_with(|| format!("creating directory '{}'", parent.display()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let file = File::create(&tmp_path).into_app_err_with(|| format!("creating snapshot file '{}'", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, &Envelope { timestamp, payload })
            .into_app_err_with(|| format!("writing snapshot file '{}'", tmp_path.display()))?;
        writer
            .flush()
            .into_app_err_with(|| format!("flushing snapshot file '{}'", tmp_path.display()))?;
        drop(writer);

        fs::rename(&tmp_path, &self.path).into_app_err_with(|| format!("replacing snapshot '{}'", self.path.display()))?;
        log::debug!(target: LOG_TARGET, "Saved snapshot '{}'", self.path.display());
        Ok(())
    }
}
