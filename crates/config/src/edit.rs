//! Camera set editing on raw documents.
//!
//! Every function returns a new document; inputs are never modified.

use crate::validate::is_valid_camera_name;
use crate::value::{ConfigMap, ConfigValue};
use frigate_config_shared::{ErrorCode, ErrorEnvelope, Result};

/// Cameras of a raw document, in document order. Documents without a
/// `cameras` mapping have none.
#[must_use]
pub fn cameras(document: &ConfigValue) -> Vec<(&str, &ConfigValue)> {
    document
        .get("cameras")
        .and_then(ConfigValue::as_map)
        .map(|map| map.iter().collect())
        .unwrap_or_default()
}

/// Add a camera, or replace the one with the same name in place.
pub fn upsert_camera(
    document: &ConfigValue,
    name: &str,
    camera: ConfigValue,
) -> Result<ConfigValue> {
    if !is_valid_camera_name(name) {
        return Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_camera_name"),
            "camera names may only contain letters, digits, '_' and '-'",
        )
        .with_metadata("camera", name));
    }

    let mut root = root_map(document)?;
    let mut cameras = match root.get("cameras") {
        None | Some(ConfigValue::Absent) => ConfigMap::new(),
        Some(ConfigValue::Map(map)) => map.clone(),
        Some(other) => return Err(not_a_mapping("cameras", other)),
    };

    let replaced = cameras.insert(name, camera).is_some();
    tracing::debug!(camera = name, replaced, "camera upserted");

    root.insert("cameras", ConfigValue::Map(cameras));
    Ok(ConfigValue::Map(root))
}

/// Remove a camera. Removing an unknown camera returns the document
/// unchanged.
pub fn remove_camera(document: &ConfigValue, name: &str) -> Result<ConfigValue> {
    let mut root = root_map(document)?;
    if let Some(ConfigValue::Map(cameras)) = root.get_mut("cameras") {
        let removed = cameras.remove(name).is_some();
        tracing::debug!(camera = name, removed, "camera removed");
    }
    Ok(ConfigValue::Map(root))
}

fn root_map(document: &ConfigValue) -> Result<ConfigMap> {
    match document {
        ConfigValue::Absent => Ok(ConfigMap::new()),
        ConfigValue::Map(map) => Ok(map.clone()),
        other => Err(not_a_mapping("root", other)),
    }
}

fn not_a_mapping(field: &str, value: &ConfigValue) -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new("config", "invalid_document"),
        format!("{field} must be a mapping"),
    )
    .with_metadata("field", field)
    .with_metadata("found", value.kind_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_yaml;
    use crate::template::camera_template;
    use std::error::Error;

    const SAMPLE: &str = "\
mqtt:
  host: mqtt.local
cameras:
  front:
    ffmpeg:
      inputs:
        - path: rtsp://front
          roles: [detect]
  back:
    ffmpeg:
      inputs:
        - path: rtsp://back
          roles: [record]
";

    #[test]
    fn lists_cameras_in_order() -> Result<(), Box<dyn Error>> {
        let document = parse_yaml(SAMPLE)?;
        let names: Vec<&str> = cameras(&document).into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["front", "back"]);
        assert!(cameras(&ConfigValue::Absent).is_empty());
        Ok(())
    }

    #[test]
    fn upsert_adds_new_camera_last() -> Result<(), Box<dyn Error>> {
        let document = parse_yaml(SAMPLE)?;
        let updated = upsert_camera(&document, "garage", camera_template())?;

        let names: Vec<&str> = cameras(&updated).into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["front", "back", "garage"]);
        assert_eq!(cameras(&document).len(), 2, "input must be untouched");
        Ok(())
    }

    #[test]
    fn upsert_replaces_in_place() -> Result<(), Box<dyn Error>> {
        let document = parse_yaml(SAMPLE)?;
        let replacement = parse_yaml("ffmpeg:\n  inputs: []\n")?;
        let updated = upsert_camera(&document, "front", replacement.clone())?;

        let listed = cameras(&updated);
        assert_eq!(listed.first().map(|(name, _)| *name), Some("front"));
        assert_eq!(listed.first().map(|(_, camera)| *camera), Some(&replacement));
        Ok(())
    }

    #[test]
    fn upsert_creates_cameras_section() -> Result<(), Box<dyn Error>> {
        let updated = upsert_camera(&ConfigValue::Absent, "yard", camera_template())?;
        assert_eq!(cameras(&updated).len(), 1);
        Ok(())
    }

    #[test]
    fn upsert_rejects_bad_names() {
        let result = upsert_camera(&ConfigValue::Absent, "front door", camera_template());
        let code = result.err().map(|error| error.code);
        assert_eq!(code, Some(ErrorCode::new("config", "invalid_camera_name")));
    }

    #[test]
    fn remove_drops_only_named_camera() -> Result<(), Box<dyn Error>> {
        let document = parse_yaml(SAMPLE)?;
        let updated = remove_camera(&document, "front")?;
        let names: Vec<&str> = cameras(&updated).into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["back"]);
        assert!(updated.get("mqtt").is_some());

        let unchanged = remove_camera(&document, "missing")?;
        assert_eq!(unchanged, document);
        Ok(())
    }

    #[test]
    fn non_mapping_documents_are_rejected() {
        let result = remove_camera(&ConfigValue::from("text"), "front");
        let code = result.err().map(|error| error.code);
        assert_eq!(code, Some(ErrorCode::new("config", "invalid_document")));
    }
}
