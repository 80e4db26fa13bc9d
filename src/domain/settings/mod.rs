//! User settings vocabulary and defaults.
//!
//! Settings are an open key/value space: the frontend may persist keys the
//! backend has no opinion about. The backend only fixes the defaults and
//! the handful of keys it reads itself.

use serde_json::{json, Value};
use std::collections::BTreeMap;

/// A user's effective settings: defaults overlaid with stored overrides.
pub type UserSettings = BTreeMap<String, Value>;

/// Well-known setting keys read by the backend.
pub mod keys {
    /// Feature flag persisted when the exposure service is connected.
    pub const EXPOSURE_ENABLED: &str = "exposureEnabled";
    /// Persisted exposure service base URL.
    pub const EXPOSURE_URL: &str = "exposureUrl";
    /// How exposure metadata is rendered: "url" or "badge".
    pub const EXPOSURE_DISPLAY_MODE: &str = "exposureDisplayMode";
    /// URL rendering style: "full" or "compact".
    pub const EXPOSURE_URL_STYLE: &str = "exposureUrlStyle";
}

/// Built-in defaults returned when a user has no stored override.
pub fn default_settings() -> UserSettings {
    let mut settings = BTreeMap::new();
    settings.insert("theme".to_string(), json!("system"));
    settings.insert("showServiceIcons".to_string(), json!(true));
    settings.insert("defaultView".to_string(), json!("service"));
    settings.insert("defaultLayout".to_string(), json!("grid"));
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_contain_expected_keys() {
        let defaults = default_settings();
        assert_eq!(defaults["theme"], json!("system"));
        assert_eq!(defaults["showServiceIcons"], json!(true));
        assert_eq!(defaults["defaultView"], json!("service"));
        assert_eq!(defaults["defaultLayout"], json!("grid"));
    }

    #[test]
    fn defaults_do_not_include_exposure_keys() {
        let defaults = default_settings();
        assert!(!defaults.contains_key(keys::EXPOSURE_URL));
        assert!(!defaults.contains_key(keys::EXPOSURE_ENABLED));
    }
}
