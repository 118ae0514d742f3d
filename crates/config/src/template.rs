//! Starter camera sections.

use crate::schema::Schema;
use crate::sections::{CAMERA, FFMPEG};
use crate::value::{ConfigMap, ConfigValue};

/// Stream URL placed in generated templates.
pub const TEMPLATE_STREAM_PATH: &str = "rtsp://example.com/stream";

/// A fully defaulted camera section with one placeholder input used for
/// detection and recording. Keys follow declaration order; optional fields
/// without defaults are omitted.
#[must_use]
pub fn camera_template() -> ConfigValue {
    let mut camera = ConfigMap::new();
    for node in CAMERA.fields {
        if node.name == "ffmpeg" {
            camera.insert(node.name, ffmpeg_template());
        } else if let Some(default) = &node.default {
            camera.insert(node.name, default.materialize(&node.kind));
        }
    }
    ConfigValue::Map(camera)
}

/// A document containing a single templated camera under `name`.
#[must_use]
pub fn camera_document_template(name: &str) -> ConfigValue {
    let mut cameras = ConfigMap::new();
    cameras.insert(name, camera_template());

    let mut root = ConfigMap::new();
    root.insert("cameras", ConfigValue::Map(cameras));
    ConfigValue::Map(root)
}

/// Default instance of a named section, for display.
#[must_use]
pub fn section_defaults(section: &str) -> Option<ConfigValue> {
    Schema::section(section).map(|section| section.default_instance())
}

fn ffmpeg_template() -> ConfigValue {
    let mut input = ConfigMap::new();
    input.insert("path", ConfigValue::from(TEMPLATE_STREAM_PATH));
    input.insert(
        "roles",
        ConfigValue::List(vec![ConfigValue::from("detect"), ConfigValue::from("record")]),
    );

    let mut ffmpeg = match FFMPEG.default_instance() {
        ConfigValue::Map(map) => map,
        _ => ConfigMap::new(),
    };
    ffmpeg.insert("inputs", ConfigValue::List(vec![ConfigValue::Map(input)]));
    ConfigValue::Map(ffmpeg)
}
