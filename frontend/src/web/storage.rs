//! LocalStorage-backed preferences
//!
//! Only the API base override is persisted. Sessions are never written here.

use gloo_storage::{LocalStorage, Storage};

const API_BASE_KEY: &str = "fscape_api_base";

pub struct Preferences;

impl Preferences {
    /// The API base saved from the login page, if any.
    pub fn api_base() -> Option<String> {
        LocalStorage::get::<String>(API_BASE_KEY).ok()
    }

    /// Returns `false` when storage is unavailable (private mode, quota).
    pub fn set_api_base(base: &str) -> bool {
        LocalStorage::set(API_BASE_KEY, base).is_ok()
    }

    pub fn clear_api_base() {
        LocalStorage::delete(API_BASE_KEY);
    }
}
