use super::storage::{KeyValueStore, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const IMAGE_UPLOAD_LIMIT: u32 = 3;
pub const COOLDOWN_PERIOD_MS: i64 = 9 * 60 * 60 * 1000;
pub const STORAGE_KEY: &str = "mediCheck_uploads";

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Persisted record: `{"count": n, "lastUploadTime": epoch_ms}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaState {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub last_upload_time: i64,
}

impl QuotaState {
    pub fn window_elapsed(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.last_upload_time) > COOLDOWN_PERIOD_MS
    }

    pub fn unlock_time_ms(&self) -> i64 {
        self.last_upload_time.saturating_add(COOLDOWN_PERIOD_MS)
    }

    /// The unlock time must be a representable timestamp.
    fn validate(self) -> Result<Self, StorageError> {
        match DateTime::from_timestamp_millis(self.unlock_time_ms()) {
            Some(_) => Ok(self),
            None => Err(StorageError::OutOfRange(self.last_upload_time)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    Allowed,
    Blocked { unlock_at_ms: i64 },
}

impl QuotaDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn unlock_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Allowed => None,
            Self::Blocked { unlock_at_ms } => DateTime::from_timestamp_millis(*unlock_at_ms),
        }
    }
}

/// Read-only view for display; never persists anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    pub count: u32,
    pub limit: u32,
    pub remaining: u32,
    pub unlock_at: Option<DateTime<Utc>>,
}

/// Gates image uploads to [`IMAGE_UPLOAD_LIMIT`] per [`COOLDOWN_PERIOD_MS`].
///
/// The check and the increment are separate read-modify-write cycles on
/// the store, so concurrent writers can over- or under-count.
pub struct QuotaTracker {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl QuotaTracker {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn load(&self) -> Result<QuotaState, StorageError> {
        match self.store.get(STORAGE_KEY).await? {
            Some(raw) => serde_json::from_str::<QuotaState>(&raw)?.validate(),
            None => Ok(QuotaState::default()),
        }
    }

    async fn persist(&self, state: &QuotaState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state)?;
        self.store.set(STORAGE_KEY, &raw).await
    }

    /// Returns whether another image upload is permitted right now.
    ///
    /// An elapsed window is reset and persisted immediately. Storage
    /// failures are logged and treated as no prior usage.
    pub async fn check_allowed(&self) -> QuotaDecision {
        let now = self.clock.now_ms();

        let mut state = match self.load().await {
            Ok(state) => state,
            Err(e) => {
                warn!("Error checking upload limit, allowing upload: {}", e);
                return QuotaDecision::Allowed;
            }
        };

        if state.window_elapsed(now) {
            state = QuotaState::default();
            if let Err(e) = self.persist(&state).await {
                warn!("Failed to persist quota reset: {}", e);
            }
        }

        if state.count >= IMAGE_UPLOAD_LIMIT {
            let unlock_at_ms = state.unlock_time_ms();
            info!(
                "Image upload limit reached ({}/{}), unlocks at {}",
                state.count, IMAGE_UPLOAD_LIMIT, unlock_at_ms
            );
            return QuotaDecision::Blocked { unlock_at_ms };
        }

        debug!("Image upload allowed ({}/{})", state.count, IMAGE_UPLOAD_LIMIT);
        QuotaDecision::Allowed
    }

    /// Consumes one quota slot. Call only after a successful image request.
    ///
    /// An unreadable record counts as empty. A failed write is returned to
    /// the caller, which is expected to log it and carry on.
    pub async fn record_upload(&self) -> Result<QuotaState, StorageError> {
        let now = self.clock.now_ms();

        let mut state = self.load().await.unwrap_or_else(|e| {
            warn!("Error reading upload count, starting from zero: {}", e);
            QuotaState::default()
        });

        if state.window_elapsed(now) {
            state.count = 0;
        }
        state.count = state.count.saturating_add(1);
        state.last_upload_time = now;

        self.persist(&state).await?;
        debug!("Recorded image upload ({}/{})", state.count, IMAGE_UPLOAD_LIMIT);
        Ok(state)
    }

    pub async fn status(&self) -> QuotaStatus {
        let now = self.clock.now_ms();
        let state = self.load().await.unwrap_or_else(|e| {
            warn!("Error reading upload count for status: {}", e);
            QuotaState::default()
        });

        let count = if state.window_elapsed(now) { 0 } else { state.count };
        let unlock_at = if count >= IMAGE_UPLOAD_LIMIT {
            DateTime::from_timestamp_millis(state.unlock_time_ms())
        } else {
            None
        };

        QuotaStatus {
            count,
            limit: IMAGE_UPLOAD_LIMIT,
            remaining: IMAGE_UPLOAD_LIMIT.saturating_sub(count),
            unlock_at,
        }
    }
}
