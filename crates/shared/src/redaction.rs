//! Secret detection and redaction utilities.
//!
//! Configuration documents carry credentials (`openai.api_key`,
//! `mqtt.password`, `onvif.password`). Error values echoed back to the user
//! pass through these helpers first.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a field name likely refers to a secret.
///
/// Matching is case-insensitive and looks at the last dotted segment only,
/// so `semantic_search.openai.api_key` and `API_KEY` both match while
/// `onvif.autotracking` does not.
///
/// # Examples
///
/// ```
/// use frigate_config_shared::is_secret_key;
///
/// assert!(is_secret_key("api_key"));
/// assert!(is_secret_key("mqtt.password"));
/// assert!(!is_secret_key("mqtt.host"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let leaf = key.rsplit('.').next().unwrap_or(key);
    let leaf = leaf.to_ascii_uppercase();
    leaf.contains("KEY")
        || leaf.contains("TOKEN")
        || leaf.contains("SECRET")
        || leaf.contains("PASSWORD")
        || leaf.contains("CREDENTIAL")
}

/// Redacts a value if the key is likely a secret.
///
/// # Examples
///
/// ```
/// use frigate_config_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("api_key", "sk-123"), "[REDACTED]");
/// assert_eq!(redact_if_secret("host", "mqtt.local"), "mqtt.local");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}
