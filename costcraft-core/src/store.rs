//! The estimation record store: owns the persisted collections.
//!
//! Every write is a whole-collection read-modify-write over the injected
//! storage, so a failed write leaves the previous collection intact. The
//! store is single-writer with last-write-wins semantics; it does not
//! coordinate concurrent mutation.
//!
//! Reads are fail-soft: a missing or unparsable collection lists as empty
//! with a warning, never as an error.

use crate::error::CostcraftError;
use crate::storage::KeyValueStorage;
use chrono::{SecondsFormat, Utc};
use costcraft_schemas::estimation::{EstimationDraft, SavedEstimation};
use costcraft_schemas::user::UserData;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Storage key for the saved-estimations collection.
pub const ESTIMATIONS_KEY: &str = "savedEstimations";
/// Storage key for the registered-users collection.
pub const USERS_KEY: &str = "registeredUsers";
/// Storage key for the current display name (session flag).
pub const USER_NAME_KEY: &str = "userName";

const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LENGTH: usize = 26;

pub struct RecordStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Assigns an id and creation timestamp to the draft, appends it to the
    /// persisted collection and rewrites the collection as a whole.
    ///
    /// On storage or serialization failure the previous collection is left
    /// untouched and the caller keeps the draft.
    pub fn save_estimation(
        &mut self,
        draft: EstimationDraft,
    ) -> Result<SavedEstimation, CostcraftError> {
        let mut estimations = self.estimations();
        let record = SavedEstimation::from_draft(draft, generate_id(), now_iso8601());
        estimations.push(record.clone());
        self.write_collection(ESTIMATIONS_KEY, &estimations)?;
        Ok(record)
    }

    /// All saved estimations in insertion order. Fail-soft: an unreadable or
    /// corrupt collection lists as empty.
    pub fn estimations(&self) -> Vec<SavedEstimation> {
        self.read_collection(ESTIMATIONS_KEY)
    }

    /// Removes the estimation with `id` and rewrites the collection.
    /// Returns whether the rewrite succeeded; an absent id is a successful
    /// no-op since the post-condition holds either way.
    pub fn delete_estimation(&mut self, id: &str) -> bool {
        let mut estimations = self.estimations();
        estimations.retain(|e| e.id != id);
        match self.write_collection(ESTIMATIONS_KEY, &estimations) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = ESTIMATIONS_KEY, error = %e, "failed to delete estimation");
                false
            }
        }
    }

    /// All registered users in registration order. Same fail-soft contract
    /// as [`Self::estimations`].
    pub fn registered_users(&self) -> Vec<UserData> {
        self.read_collection(USERS_KEY)
    }

    /// Appends a registered-user record and stores the first name as the
    /// session display name.
    pub fn register_user(
        &mut self,
        full_name: &str,
        email: &str,
        interests: Option<String>,
    ) -> Result<UserData, CostcraftError> {
        if full_name.trim().is_empty() {
            return Err(CostcraftError::validation("fullName", "Full name is required"));
        }
        if email.trim().is_empty() {
            return Err(CostcraftError::validation("email", "Email is required"));
        }

        let user = UserData {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            interests,
            created_at: now_iso8601(),
        };

        let mut users = self.registered_users();
        users.push(user.clone());
        self.write_collection(USERS_KEY, &users)?;

        let first_name = user
            .full_name
            .split_whitespace()
            .next()
            .unwrap_or(&user.full_name)
            .to_string();
        self.set_user_name(&first_name)?;

        Ok(user)
    }

    /// The stored display name, if a user is "logged in".
    pub fn user_name(&self) -> Option<String> {
        match self.storage.get(USER_NAME_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = USER_NAME_KEY, error = %e, "failed to read display name");
                None
            }
        }
    }

    pub fn set_user_name(&mut self, name: &str) -> Result<(), CostcraftError> {
        self.storage.set(USER_NAME_KEY, name)
    }

    /// Clears the session flag.
    pub fn clear_user_name(&mut self) -> Result<(), CostcraftError> {
        self.storage.remove(USER_NAME_KEY)
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "failed to read collection");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "failed to parse stored collection");
                Vec::new()
            }
        }
    }

    fn write_collection<T: Serialize>(
        &mut self,
        key: &str,
        items: &[T],
    ) -> Result<(), CostcraftError> {
        let json = serde_json::to_string(items)?;
        self.storage.set(key, &json)
    }
}

/// Random, non-cryptographic record id: 26 characters drawn from the
/// lowercase base-36 alphabet. Collisions are possible in principle and
/// negligible in practice.
fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..ID_CHARSET.len());
            ID_CHARSET[idx] as char
        })
        .collect()
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
