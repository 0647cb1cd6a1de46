//! Request Validators
//!
//! Pure validation of device identifiers and optional-scope strings,
//! checked locally before any network call.

use crate::error::ValidationError;

/// Validate a device id.
///
/// The provider accepts 6 to 50 alphanumeric characters.
pub fn validate_device_id(device_id: &str) -> Result<(), ValidationError> {
    let length = device_id.chars().count();
    if length < 6 {
        return Err(ValidationError::InvalidDeviceId {
            reason: "device id is too short".to_string(),
        });
    }
    if length > 50 {
        return Err(ValidationError::InvalidDeviceId {
            reason: "device id is too long".to_string(),
        });
    }
    if !device_id.chars().all(|c| c.is_alphanumeric()) {
        return Err(ValidationError::InvalidDeviceId {
            reason: "device id must contain only alphanumeric characters".to_string(),
        });
    }
    Ok(())
}

/// Validate a device name.
///
/// The provider truncates nothing; names over 100 characters are rejected.
pub fn validate_device_name(device_name: &str) -> Result<(), ValidationError> {
    if device_name.chars().count() > 100 {
        return Err(ValidationError::InvalidDeviceName {
            reason: "device name is too long".to_string(),
        });
    }
    Ok(())
}

/// Find optional scopes that the granted scope does not cover.
///
/// `optional_scope` is a comma-separated list; each trimmed entry is
/// checked by substring containment against `granted_scope`, so `login`
/// counts as granted when the scope string contains `login:info`. Never
/// fails; the returned entries are warning material, not errors.
pub fn ignored_optional_scopes(granted_scope: &str, optional_scope: &str) -> Vec<String> {
    optional_scope
        .split(',')
        .map(str::trim)
        .filter(|entry| !granted_scope.contains(entry))
        .map(String::from)
        .collect()
}
