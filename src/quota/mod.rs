//! Client-side image upload quota.
//!
//! Enforcement is advisory: the record lives in a local store the user
//! controls, so clearing that store resets the quota.

mod storage;
mod tracker;

pub use storage::{KeyValueStore, LibsqlStore, MemoryStore, StorageError};
pub use tracker::{
    COOLDOWN_PERIOD_MS, Clock, IMAGE_UPLOAD_LIMIT, QuotaDecision, QuotaState, QuotaStatus,
    QuotaTracker, STORAGE_KEY, SystemClock,
};
