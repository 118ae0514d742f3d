//! Property tests for normalization and camera naming.

use frigate_config_schema::{
    ConfigMap, ConfigValue, ValidationErrorKind, Validator, camera_template, is_valid_camera_name,
    upsert_camera,
};
use proptest::prelude::*;

const ROLES: [&str; 3] = ["detect", "record", "audio"];
const PROVIDERS: [&str; 5] = ["transformers", "Transformers", "TRANSFORMERS", "openai", "OpenAI"];

#[derive(Debug, Clone)]
struct CameraShape {
    fps: Option<i64>,
    snapshots: Option<bool>,
    roles: Vec<&'static str>,
    leading_nulls: bool,
    extra: Option<String>,
    zones: Vec<String>,
    required: Vec<usize>,
    filter_threshold: Option<u8>,
}

fn map_of(entries: Vec<(&str, ConfigValue)>) -> ConfigValue {
    let mut map = ConfigMap::new();
    for (key, value) in entries {
        map.insert(key, value);
    }
    ConfigValue::Map(map)
}

fn strings<'a>(items: impl IntoIterator<Item = &'a str>) -> ConfigValue {
    ConfigValue::List(items.into_iter().map(ConfigValue::from).collect())
}

fn camera(shape: &CameraShape) -> ConfigValue {
    let input = map_of(vec![
        ("path", ConfigValue::from("rtsp://10.0.0.1/stream")),
        ("roles", strings(shape.roles.iter().copied())),
    ]);

    let mut camera = ConfigMap::new();
    if shape.leading_nulls {
        // Nulls ahead of real keys: defaults land after them once filled.
        camera.insert("enabled", ConfigValue::Absent);
        camera.insert("webui_url", ConfigValue::Absent);
    }
    camera.insert("ffmpeg", map_of(vec![("inputs", ConfigValue::List(vec![input]))]));

    let mut detect = ConfigMap::new();
    if shape.leading_nulls {
        detect.insert("width", ConfigValue::Absent);
    }
    if let Some(fps) = shape.fps {
        detect.insert("fps", ConfigValue::Integer(fps));
    }
    if !detect.is_empty() {
        camera.insert("detect", ConfigValue::Map(detect));
    }

    if let Some(threshold) = shape.filter_threshold {
        let filter = map_of(vec![("threshold", ConfigValue::Float(f64::from(threshold) / 100.0))]);
        camera.insert("objects", map_of(vec![("filters", map_of(vec![("person", filter)]))]));
    }

    if !shape.zones.is_empty() {
        let zones: ConfigMap = shape
            .zones
            .iter()
            .map(|name| {
                let zone = map_of(vec![("coordinates", ConfigValue::from("0,0,1,0,1,1"))]);
                (name.clone(), zone)
            })
            .collect();
        camera.insert("zones", ConfigValue::Map(zones));
    }

    let required: Vec<&str> = shape
        .required
        .iter()
        .filter_map(|index| shape.zones.get(*index).map(String::as_str))
        .collect();
    if shape.snapshots.is_some() || !required.is_empty() {
        let mut snapshots = ConfigMap::new();
        if let Some(enabled) = shape.snapshots {
            snapshots.insert("enabled", ConfigValue::Bool(enabled));
        }
        if !required.is_empty() {
            snapshots.insert("required_zones", strings(required));
        }
        camera.insert("snapshots", ConfigValue::Map(snapshots));
    }

    if let Some(extra) = &shape.extra {
        camera.insert(format!("x_{extra}"), ConfigValue::from(extra.as_str()));
    }
    ConfigValue::Map(camera)
}

fn camera_strategy() -> impl Strategy<Value = CameraShape> {
    (
        proptest::option::of(1i64..60),
        proptest::option::of(any::<bool>()),
        proptest::sample::subsequence(ROLES.to_vec(), 1..=3),
        any::<bool>(),
        proptest::option::of("[a-z]{1,8}"),
        proptest::collection::btree_set("[a-z]{1,6}", 0..3),
        proptest::collection::vec(0usize..3, 0..3),
        proptest::option::of(0u8..=100),
    )
        .prop_map(
            |(fps, snapshots, roles, leading_nulls, extra, zones, required, filter_threshold)| {
                CameraShape {
                    fps,
                    snapshots,
                    roles,
                    leading_nulls,
                    extra,
                    zones: zones.into_iter().collect(),
                    required,
                    filter_threshold,
                }
            },
        )
}

fn top_level_strategy() -> impl Strategy<Value = (Option<u16>, Option<&'static str>)> {
    (
        proptest::option::of(1u16..),
        proptest::option::of(proptest::sample::select(PROVIDERS.to_vec())),
    )
}

fn document_strategy() -> impl Strategy<Value = ConfigValue> {
    (
        proptest::collection::vec(("[a-z][a-z0-9_-]{0,11}", camera_strategy()), 0..4),
        top_level_strategy(),
    )
        .prop_map(|(entries, (mqtt_port, provider))| {
            let cameras: ConfigMap = entries
                .into_iter()
                .map(|(name, shape)| (name, camera(&shape)))
                .collect();
            let mut root = ConfigMap::new();
            root.insert("cameras", ConfigValue::Map(cameras));
            if let Some(port) = mqtt_port {
                root.insert(
                    "mqtt",
                    map_of(vec![
                        ("host", ConfigValue::from("mqtt.local")),
                        ("port", ConfigValue::Integer(i64::from(port))),
                    ]),
                );
            }
            if let Some(provider) = provider {
                let mut search = vec![("provider", ConfigValue::from(provider))];
                if provider.eq_ignore_ascii_case("openai") {
                    let openai = map_of(vec![("api_key", ConfigValue::from("sk-test"))]);
                    search.push(("openai", openai));
                }
                root.insert("semantic_search", map_of(search));
            }
            root.insert("x_notes", ConfigValue::from("kept as is"));
            ConfigValue::Map(root)
        })
}

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in document_strategy()) {
        let validator = Validator::new().map_err(|defect| TestCaseError::fail(defect.to_string()))?;
        let first = validator.validate(&raw);
        prop_assert!(first.is_valid(), "{:?}", first.errors);

        let normalized = first
            .into_result()
            .map_err(|errors| TestCaseError::fail(errors.to_string()))?;
        let notes = ConfigValue::from("kept as is");
        prop_assert_eq!(normalized.get("x_notes"), Some(&notes));
        if let Some(provider) = normalized.get("semantic_search.provider") {
            let canonical = provider.as_str().unwrap_or_default();
            prop_assert!(canonical == "transformers" || canonical == "openai");
        }

        let second = validator.validate(normalized.as_value());
        prop_assert_eq!(second.normalized.as_ref(), Some(&normalized));
    }

    #[test]
    fn well_formed_camera_names_are_accepted(name in "[A-Za-z0-9_-]{1,24}") {
        prop_assert!(is_valid_camera_name(&name));
        let document = upsert_camera(&ConfigValue::Absent, &name, camera_template())
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        let validator = Validator::new().map_err(|defect| TestCaseError::fail(defect.to_string()))?;
        let outcome = validator.validate(&document);
        prop_assert!(outcome.is_valid(), "{:?}", outcome.errors);
    }

    #[test]
    fn names_with_other_characters_are_rejected(
        head in "[a-z]{0,6}",
        bad in "[ .!/:@]",
        tail in "[a-z]{0,6}",
    ) {
        let name = format!("{head}{bad}{tail}");
        prop_assert!(!is_valid_camera_name(&name));

        let shape = CameraShape {
            fps: None,
            snapshots: None,
            roles: vec!["detect"],
            leading_nulls: false,
            extra: None,
            zones: Vec::new(),
            required: Vec::new(),
            filter_threshold: None,
        };
        let mut cameras = ConfigMap::new();
        cameras.insert(name.as_str(), camera(&shape));
        let mut root = ConfigMap::new();
        root.insert("cameras", ConfigValue::Map(cameras));

        let validator = Validator::new().map_err(|defect| TestCaseError::fail(defect.to_string()))?;
        let outcome = validator.validate(&ConfigValue::Map(root));
        prop_assert!(outcome
            .errors
            .iter()
            .any(|error| error.kind == ValidationErrorKind::ConstraintViolation));
    }

    #[test]
    fn camera_rules_run_despite_a_bad_name(
        head in "[a-z]{1,6}",
        bad in "[ .!/:@]",
    ) {
        let name = format!("{head}{bad}cam");
        let autotracking = map_of(vec![("enabled", ConfigValue::Bool(true))]);
        let mut camera = match camera_template() {
            ConfigValue::Map(map) => map,
            other => return Err(TestCaseError::fail(format!("template is {other:?}"))),
        };
        camera.insert("onvif", map_of(vec![("autotracking", autotracking)]));
        let mut cameras = ConfigMap::new();
        cameras.insert(name.as_str(), ConfigValue::Map(camera));
        let mut root = ConfigMap::new();
        root.insert("cameras", ConfigValue::Map(cameras));

        let validator = Validator::new().map_err(|defect| TestCaseError::fail(defect.to_string()))?;
        let outcome = validator.validate(&ConfigValue::Map(root));
        let host = format!("cameras.{name}.onvif.host");
        prop_assert!(outcome
            .errors
            .iter()
            .any(|error| error.kind == ValidationErrorKind::CrossField
                && error.path.to_string() == host));
    }
}
