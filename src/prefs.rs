//! Preference store over `window.localStorage`.
//!
//! Values are JSON-serialized, so the numeric fields persist their text
//! form (e.g. `"30"`) and the blink flag persists as a plain boolean.
//! Only configuration lives here; run progress is never persisted.
//!
//! Every failure path degrades to the provided default: a missing storage
//! area (disabled cookies, sandboxed frame), an absent key, or a stored
//! value that no longer parses.

use gloo_utils::window;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::Storage;

fn storage() -> Option<Storage> {
    match window().local_storage() {
        Ok(storage) => storage,
        Err(_) => None,
    }
}

/// Read a value by key, falling back to `default` when the key is absent
/// or unreadable.
pub fn get<T: DeserializeOwned>(key: &str, default: T) -> T {
    let Some(storage) = storage() else {
        return default;
    };
    match storage.get_item(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or(default),
        _ => default,
    }
}

/// Persist a value by key. Best-effort: failures are logged and dropped.
pub fn set<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = storage() else {
        log::warn!("localStorage unavailable, not persisting {key}");
        return;
    };
    match serde_json::to_string(value) {
        Ok(raw) => {
            if storage.set_item(key, &raw).is_err() {
                log::warn!("failed to persist preference {key}");
            }
        }
        Err(err) => log::warn!("failed to serialize preference {key}: {err}"),
    }
}
