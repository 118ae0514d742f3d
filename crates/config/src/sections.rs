//! Built-in section declarations.
//!
//! Field order here is the order used for default instances and templates.

use crate::schema::{DefaultValue, EnumSpec, NumericRange, SchemaNode, Section, ValueKind};

const INPUT_ROLES: EnumSpec = EnumSpec::exact(&["detect", "record", "audio"]);
const RETAIN_MODES: EnumSpec = EnumSpec::exact(&["all", "motion", "active_objects"]);
const ZOOMING_MODES: EnumSpec = EnumSpec::exact(&["disabled", "absolute", "relative"]);
const AUDIO_LABELS: EnumSpec =
    EnumSpec::exact(&["bark", "fire_alarm", "scream", "speech", "yell"]);
const EMBEDDING_PROVIDERS: EnumSpec = EnumSpec::ignore_case(&["transformers", "openai"]);

const PERCENT: NumericRange = NumericRange::between(0.0, 100.0);
const POSITIVE: NumericRange = NumericRange::at_least(1.0);
const NON_NEGATIVE: NumericRange = NumericRange::at_least(0.0);
const UNIT: NumericRange = NumericRange::between(0.0, 1.0);
const TCP_PORT: NumericRange = NumericRange::between(1.0, 65535.0);

static STRING: ValueKind = ValueKind::String;
static INTEGER: ValueKind = ValueKind::Integer;
static ROLE: ValueKind = ValueKind::Enum(INPUT_ROLES);
static AUDIO_LABEL: ValueKind = ValueKind::Enum(AUDIO_LABELS);
static CAMERA_ENTRY: ValueKind = ValueKind::Object(&CAMERA);
static FFMPEG_INPUT_ENTRY: ValueKind = ValueKind::Object(&FFMPEG_INPUT);
static OBJECT_FILTER_ENTRY: ValueKind = ValueKind::Object(&OBJECT_FILTER);
static ZONE_ENTRY: ValueKind = ValueKind::Object(&ZONE);
static ZONE_FILTER_ENTRY: ValueKind = ValueKind::Object(&ZONE_FILTER);
static AUDIO_FILTER_ENTRY: ValueKind = ValueKind::Object(&AUDIO_FILTER);
static DETECTOR_ENTRY: ValueKind = ValueKind::Object(&DETECTOR);

/// Every section, root first.
pub static ALL: &[&Section] = &[
    &ROOT,
    &CAMERA,
    &FFMPEG,
    &FFMPEG_INPUT,
    &DETECT,
    &MOTION,
    &OBJECTS,
    &OBJECT_FILTER,
    &SNAPSHOTS,
    &SNAPSHOT_RETAIN,
    &RECORD,
    &RECORD_RETAIN,
    &RECORD_EVENTS,
    &ZONE,
    &ZONE_FILTER,
    &CAMERA_MQTT,
    &ONVIF,
    &AUTOTRACKING,
    &AUDIO,
    &AUDIO_FILTER,
    &MQTT,
    &SEMANTIC_SEARCH,
    &OPENAI,
    &DETECTOR,
    &DATABASE,
];

/// Document root.
pub static ROOT: Section = Section {
    name: "root",
    doc: "Top-level configuration document",
    fields: &[
        SchemaNode::new("cameras", ValueKind::Map(&CAMERA_ENTRY))
            .default(DefaultValue::EmptyMap)
            .doc("Cameras keyed by name"),
        SchemaNode::new("mqtt", ValueKind::Object(&MQTT)).doc("MQTT broker connection"),
        SchemaNode::new("audio", ValueKind::Object(&AUDIO)).doc("Global audio detection"),
        SchemaNode::new("semantic_search", ValueKind::Object(&SEMANTIC_SEARCH))
            .doc("Embedding-based search"),
        SchemaNode::new("detectors", ValueKind::Map(&DETECTOR_ENTRY))
            .doc("Object detectors keyed by name"),
        SchemaNode::new("database", ValueKind::Object(&DATABASE)).doc("Event database"),
    ],
};

/// One camera.
pub static CAMERA: Section = Section {
    name: "camera",
    doc: "A single camera",
    fields: &[
        SchemaNode::new("ffmpeg", ValueKind::Object(&FFMPEG))
            .required()
            .doc("Stream inputs and ffmpeg arguments"),
        SchemaNode::new("detect", ValueKind::Object(&DETECT))
            .default(DefaultValue::Section)
            .doc("Object detection"),
        SchemaNode::new("motion", ValueKind::Object(&MOTION))
            .default(DefaultValue::Section)
            .doc("Motion detection"),
        SchemaNode::new("objects", ValueKind::Object(&OBJECTS))
            .default(DefaultValue::Section)
            .doc("Tracked object labels"),
        SchemaNode::new("snapshots", ValueKind::Object(&SNAPSHOTS))
            .default(DefaultValue::Section)
            .doc("Snapshot images"),
        SchemaNode::new("record", ValueKind::Object(&RECORD))
            .default(DefaultValue::Section)
            .doc("Recording"),
        SchemaNode::new("zones", ValueKind::Map(&ZONE_ENTRY))
            .default(DefaultValue::EmptyMap)
            .doc("Zones keyed by name"),
        SchemaNode::new("mqtt", ValueKind::Object(&CAMERA_MQTT))
            .default(DefaultValue::Section)
            .doc("Per-camera MQTT image publishing"),
        SchemaNode::new("onvif", ValueKind::Object(&ONVIF))
            .default(DefaultValue::Section)
            .doc("ONVIF control"),
        SchemaNode::new("audio", ValueKind::Object(&AUDIO)).doc("Per-camera audio detection"),
        SchemaNode::new("enabled", ValueKind::Boolean)
            .default(DefaultValue::Bool(true))
            .doc("Process this camera"),
        SchemaNode::new("best_image_timeout", ValueKind::Integer)
            .range(POSITIVE)
            .default(DefaultValue::Integer(60))
            .doc("Seconds to wait for a better snapshot"),
        SchemaNode::new("webui_url", ValueKind::String).doc("Link to the camera's own UI"),
    ],
};

/// Camera ffmpeg settings.
pub static FFMPEG: Section = Section {
    name: "ffmpeg",
    doc: "Stream inputs and ffmpeg arguments",
    fields: &[
        SchemaNode::new("inputs", ValueKind::List(&FFMPEG_INPUT_ENTRY))
            .required()
            .non_empty()
            .doc("Stream inputs"),
        SchemaNode::new("global_args", ValueKind::String),
        SchemaNode::new("hwaccel_args", ValueKind::String),
        SchemaNode::new("input_args", ValueKind::String),
        SchemaNode::new("output_args", ValueKind::Map(&STRING))
            .doc("Output arguments per role"),
    ],
};

/// One ffmpeg input stream.
pub static FFMPEG_INPUT: Section = Section {
    name: "ffmpeg_input",
    doc: "One stream input",
    fields: &[
        SchemaNode::new("path", ValueKind::String)
            .required()
            .non_empty()
            .doc("Stream URL"),
        SchemaNode::new("roles", ValueKind::List(&ROLE))
            .required()
            .non_empty()
            .doc("What the stream is used for"),
        SchemaNode::new("global_args", ValueKind::String),
        SchemaNode::new("hwaccel_args", ValueKind::String),
        SchemaNode::new("input_args", ValueKind::String),
    ],
};

/// Object detection.
pub static DETECT: Section = Section {
    name: "detect",
    doc: "Object detection",
    fields: &[
        SchemaNode::new("width", ValueKind::Integer)
            .range(POSITIVE)
            .doc("Detect stream width"),
        SchemaNode::new("height", ValueKind::Integer)
            .range(POSITIVE)
            .doc("Detect stream height"),
        SchemaNode::new("fps", ValueKind::Integer)
            .range(POSITIVE)
            .default(DefaultValue::Integer(5))
            .doc("Frames per second to run detection on"),
        SchemaNode::new("enabled", ValueKind::Boolean).default(DefaultValue::Bool(true)),
        SchemaNode::new("min_initialized", ValueKind::Integer).range(POSITIVE),
        SchemaNode::new("max_disappeared", ValueKind::Integer).range(POSITIVE),
    ],
};

/// Motion detection.
pub static MOTION: Section = Section {
    name: "motion",
    doc: "Motion detection",
    fields: &[
        SchemaNode::new("enabled", ValueKind::Boolean).default(DefaultValue::Bool(true)),
        SchemaNode::new("threshold", ValueKind::Integer)
            .range(NumericRange::between(1.0, 255.0))
            .default(DefaultValue::Integer(30))
            .doc("Pixel difference that counts as motion"),
        SchemaNode::new("contour_area", ValueKind::Integer)
            .range(POSITIVE)
            .default(DefaultValue::Integer(10)),
        SchemaNode::new("frame_alpha", ValueKind::Float)
            .range(UNIT)
            .default(DefaultValue::Float(0.01)),
        SchemaNode::new("frame_height", ValueKind::Integer)
            .range(POSITIVE)
            .default(DefaultValue::Integer(100)),
        SchemaNode::new("improve_contrast", ValueKind::Boolean).default(DefaultValue::Bool(true)),
        SchemaNode::new("mask", ValueKind::String).doc("Polygon excluded from motion"),
    ],
};

/// Tracked object labels.
pub static OBJECTS: Section = Section {
    name: "objects",
    doc: "Tracked object labels",
    fields: &[
        SchemaNode::new("track", ValueKind::List(&STRING))
            .default(DefaultValue::StrList(&["person"]))
            .doc("Labels to track"),
        SchemaNode::new("filters", ValueKind::Map(&OBJECT_FILTER_ENTRY))
            .default(DefaultValue::EmptyMap)
            .doc("Filters keyed by label"),
        SchemaNode::new("mask", ValueKind::String),
    ],
};

/// Per-label object filter.
pub static OBJECT_FILTER: Section = Section {
    name: "object_filter",
    doc: "Per-label object filter",
    fields: &[
        SchemaNode::new("min_area", ValueKind::Integer)
            .range(NON_NEGATIVE)
            .default(DefaultValue::Integer(0)),
        SchemaNode::new("max_area", ValueKind::Integer)
            .range(NON_NEGATIVE)
            .default(DefaultValue::Integer(24_000_000)),
        SchemaNode::new("min_ratio", ValueKind::Float)
            .range(NON_NEGATIVE)
            .default(DefaultValue::Float(0.0)),
        SchemaNode::new("max_ratio", ValueKind::Float)
            .range(NON_NEGATIVE)
            .default(DefaultValue::Float(24_000_000.0)),
        SchemaNode::new("min_score", ValueKind::Float)
            .range(UNIT)
            .default(DefaultValue::Float(0.5)),
        SchemaNode::new("threshold", ValueKind::Float)
            .range(UNIT)
            .default(DefaultValue::Float(0.7)),
        SchemaNode::new("mask", ValueKind::String),
    ],
};

/// Snapshot images.
pub static SNAPSHOTS: Section = Section {
    name: "snapshots",
    doc: "Snapshot images",
    fields: &[
        SchemaNode::new("enabled", ValueKind::Boolean).default(DefaultValue::Bool(false)),
        SchemaNode::new("clean_copy", ValueKind::Boolean).default(DefaultValue::Bool(true)),
        SchemaNode::new("timestamp", ValueKind::Boolean).default(DefaultValue::Bool(false)),
        SchemaNode::new("bounding_box", ValueKind::Boolean).default(DefaultValue::Bool(true)),
        SchemaNode::new("crop", ValueKind::Boolean).default(DefaultValue::Bool(false)),
        SchemaNode::new("height", ValueKind::Integer)
            .range(POSITIVE)
            .default(DefaultValue::Integer(175)),
        SchemaNode::new("required_zones", ValueKind::List(&STRING))
            .default(DefaultValue::EmptyList)
            .doc("Zones an object must enter before a snapshot is saved"),
        SchemaNode::new("retain", ValueKind::Object(&SNAPSHOT_RETAIN))
            .default(DefaultValue::Section),
        SchemaNode::new("quality", ValueKind::Integer)
            .range(PERCENT)
            .default(DefaultValue::Integer(70))
            .doc("JPEG quality"),
    ],
};

/// Snapshot retention.
pub static SNAPSHOT_RETAIN: Section = Section {
    name: "snapshot_retain",
    doc: "Snapshot retention in days",
    fields: &[
        SchemaNode::new("default", ValueKind::Integer)
            .range(NON_NEGATIVE)
            .default(DefaultValue::Integer(10)),
        SchemaNode::new("objects", ValueKind::Map(&INTEGER))
            .default(DefaultValue::EmptyMap)
            .doc("Retention overrides keyed by label"),
    ],
};

/// Recording.
pub static RECORD: Section = Section {
    name: "record",
    doc: "Recording",
    fields: &[
        SchemaNode::new("enabled", ValueKind::Boolean).default(DefaultValue::Bool(false)),
        SchemaNode::new("retain", ValueKind::Object(&RECORD_RETAIN))
            .default(DefaultValue::Section),
        SchemaNode::new("events", ValueKind::Object(&RECORD_EVENTS))
            .default(DefaultValue::Section),
    ],
};

/// Recording retention.
pub static RECORD_RETAIN: Section = Section {
    name: "record_retain",
    doc: "Recording retention",
    fields: &[
        SchemaNode::new("days", ValueKind::Integer)
            .range(NON_NEGATIVE)
            .default(DefaultValue::Integer(0)),
        SchemaNode::new("mode", ValueKind::Enum(RETAIN_MODES)).default(DefaultValue::Str("all")),
    ],
};

/// Event recording.
pub static RECORD_EVENTS: Section = Section {
    name: "record_events",
    doc: "Event clip recording",
    fields: &[
        SchemaNode::new("pre_capture", ValueKind::Integer)
            .range(NON_NEGATIVE)
            .default(DefaultValue::Integer(5))
            .doc("Seconds before the event"),
        SchemaNode::new("post_capture", ValueKind::Integer)
            .range(NON_NEGATIVE)
            .default(DefaultValue::Integer(5))
            .doc("Seconds after the event"),
        SchemaNode::new("required_zones", ValueKind::List(&STRING))
            .default(DefaultValue::EmptyList),
        SchemaNode::new("objects", ValueKind::List(&STRING)),
    ],
};

/// A named zone.
pub static ZONE: Section = Section {
    name: "zone",
    doc: "A named polygon in the camera frame",
    fields: &[
        SchemaNode::new("coordinates", ValueKind::String)
            .required()
            .non_empty()
            .doc("Polygon as x1,y1,x2,y2,..."),
        SchemaNode::new("objects", ValueKind::List(&STRING)),
        SchemaNode::new("filters", ValueKind::Map(&ZONE_FILTER_ENTRY))
            .default(DefaultValue::EmptyMap),
        SchemaNode::new("inertia", ValueKind::Integer)
            .range(NON_NEGATIVE)
            .default(DefaultValue::Integer(3)),
        SchemaNode::new("loitering_time", ValueKind::Integer)
            .range(NON_NEGATIVE)
            .default(DefaultValue::Integer(0)),
    ],
};

/// Per-label zone filter.
pub static ZONE_FILTER: Section = Section {
    name: "zone_filter",
    doc: "Per-label zone filter",
    fields: &[
        SchemaNode::new("min_area", ValueKind::Integer),
        SchemaNode::new("max_area", ValueKind::Integer),
        SchemaNode::new("threshold", ValueKind::Float).range(UNIT),
    ],
};

/// Per-camera MQTT image publishing.
pub static CAMERA_MQTT: Section = Section {
    name: "camera_mqtt",
    doc: "Per-camera MQTT image publishing",
    fields: &[
        SchemaNode::new("enabled", ValueKind::Boolean).default(DefaultValue::Bool(true)),
        SchemaNode::new("timestamp", ValueKind::Boolean).default(DefaultValue::Bool(true)),
        SchemaNode::new("bounding_box", ValueKind::Boolean).default(DefaultValue::Bool(true)),
        SchemaNode::new("crop", ValueKind::Boolean).default(DefaultValue::Bool(true)),
        SchemaNode::new("height", ValueKind::Integer)
            .range(NumericRange::between(100.0, 720.0))
            .default(DefaultValue::Integer(270)),
        SchemaNode::new("quality", ValueKind::Integer)
            .range(NumericRange::between(1.0, 100.0))
            .default(DefaultValue::Integer(70)),
        SchemaNode::new("required_zones", ValueKind::List(&STRING))
            .default(DefaultValue::EmptyList),
    ],
};

/// ONVIF camera control.
pub static ONVIF: Section = Section {
    name: "onvif",
    doc: "ONVIF camera control",
    fields: &[
        SchemaNode::new("host", ValueKind::String).doc("ONVIF endpoint host"),
        SchemaNode::new("port", ValueKind::Integer)
            .range(TCP_PORT)
            .default(DefaultValue::Integer(8000)),
        SchemaNode::new("user", ValueKind::String),
        SchemaNode::new("password", ValueKind::String),
        SchemaNode::new("tls_insecure", ValueKind::Boolean).default(DefaultValue::Bool(false)),
        SchemaNode::new("ignore_time_mismatch", ValueKind::Boolean)
            .default(DefaultValue::Bool(false)),
        SchemaNode::new("autotracking", ValueKind::Object(&AUTOTRACKING))
            .default(DefaultValue::Section),
    ],
};

/// PTZ autotracking.
pub static AUTOTRACKING: Section = Section {
    name: "autotracking",
    doc: "PTZ autotracking",
    fields: &[
        SchemaNode::new("enabled", ValueKind::Boolean).default(DefaultValue::Bool(false)),
        SchemaNode::new("calibrate_on_startup", ValueKind::Boolean)
            .default(DefaultValue::Bool(false)),
        SchemaNode::new("zooming", ValueKind::Enum(ZOOMING_MODES))
            .default(DefaultValue::Str("disabled")),
        SchemaNode::new("zoom_factor", ValueKind::Float)
            .range(NumericRange::between(0.1, 0.75))
            .default(DefaultValue::Float(0.3)),
        SchemaNode::new("track", ValueKind::List(&STRING))
            .default(DefaultValue::StrList(&["person"])),
        SchemaNode::new("required_zones", ValueKind::List(&STRING))
            .default(DefaultValue::EmptyList),
        SchemaNode::new("return_preset", ValueKind::String)
            .doc("Preset to return to when tracking ends"),
        SchemaNode::new("timeout", ValueKind::Integer)
            .range(NumericRange::between(1.0, 60.0))
            .default(DefaultValue::Integer(10)),
    ],
};

/// Audio detection.
pub static AUDIO: Section = Section {
    name: "audio",
    doc: "Audio detection",
    fields: &[
        SchemaNode::new("enabled", ValueKind::Boolean).default(DefaultValue::Bool(false)),
        SchemaNode::new("max_not_heard", ValueKind::Integer)
            .range(NumericRange::between(1.0, 300.0))
            .default(DefaultValue::Integer(30)),
        SchemaNode::new("min_volume", ValueKind::Integer)
            .range(NumericRange::between(0.0, 2000.0))
            .default(DefaultValue::Integer(500)),
        SchemaNode::new("listen", ValueKind::List(&AUDIO_LABEL))
            .default(DefaultValue::EmptyList)
            .doc("Labels to listen for"),
        SchemaNode::new("filters", ValueKind::Map(&AUDIO_FILTER_ENTRY))
            .default(DefaultValue::EmptyMap),
    ],
};

/// Per-label audio filter.
pub static AUDIO_FILTER: Section = Section {
    name: "audio_filter",
    doc: "Per-label audio filter",
    fields: &[SchemaNode::new("threshold", ValueKind::Float)
        .range(NumericRange::between(0.1, 1.0))
        .default(DefaultValue::Float(0.8))],
};

/// MQTT broker connection.
pub static MQTT: Section = Section {
    name: "mqtt",
    doc: "MQTT broker connection",
    fields: &[
        SchemaNode::new("enabled", ValueKind::Boolean).default(DefaultValue::Bool(true)),
        SchemaNode::new("host", ValueKind::String)
            .required()
            .non_empty()
            .doc("Broker host"),
        SchemaNode::new("port", ValueKind::Integer)
            .range(TCP_PORT)
            .default(DefaultValue::Integer(1883)),
        SchemaNode::new("topic_prefix", ValueKind::String).default(DefaultValue::Str("frigate")),
        SchemaNode::new("client_id", ValueKind::String).default(DefaultValue::Str("frigate")),
        SchemaNode::new("user", ValueKind::String),
        SchemaNode::new("password", ValueKind::String),
        SchemaNode::new("tls_ca_certs", ValueKind::String),
        SchemaNode::new("tls_client_cert", ValueKind::String),
        SchemaNode::new("tls_client_key", ValueKind::String),
        SchemaNode::new("tls_insecure", ValueKind::Boolean),
        SchemaNode::new("stats_interval", ValueKind::Integer)
            .range(NumericRange::between(1.0, 3600.0))
            .default(DefaultValue::Integer(60))
            .doc("Seconds between stats messages"),
    ],
};

/// Embedding-based search.
pub static SEMANTIC_SEARCH: Section = Section {
    name: "semantic_search",
    doc: "Embedding-based search",
    fields: &[
        SchemaNode::new("enabled", ValueKind::Boolean).default(DefaultValue::Bool(false)),
        SchemaNode::new("model", ValueKind::String).default(DefaultValue::Str("all-MiniLM-L6-v2")),
        SchemaNode::new("provider", ValueKind::Enum(EMBEDDING_PROVIDERS))
            .default(DefaultValue::Str("transformers"))
            .doc("Embedding backend"),
        SchemaNode::new("batch_size", ValueKind::Integer)
            .range(NumericRange::between(1.0, 100.0))
            .default(DefaultValue::Integer(50)),
        SchemaNode::new("refresh_interval", ValueKind::Integer)
            .range(NumericRange::between(0.0, 3600.0))
            .default(DefaultValue::Integer(60)),
        SchemaNode::new("openai", ValueKind::Object(&OPENAI))
            .doc("Settings for the openai provider"),
    ],
};

/// `OpenAI` embedding provider.
pub static OPENAI: Section = Section {
    name: "openai",
    doc: "OpenAI embedding provider",
    fields: &[
        SchemaNode::new("api_key", ValueKind::String).required(),
        SchemaNode::new("model", ValueKind::String)
            .default(DefaultValue::Str("text-embedding-ada-002")),
    ],
};

/// Object detector.
pub static DETECTOR: Section = Section {
    name: "detector",
    doc: "Object detector",
    fields: &[
        SchemaNode::new("type", ValueKind::String)
            .required()
            .non_empty()
            .doc("Detector backend (cpu, edgetpu, ...)"),
        SchemaNode::new("device", ValueKind::String),
    ],
};

/// Event database.
pub static DATABASE: Section = Section {
    name: "database",
    doc: "Event database",
    fields: &[SchemaNode::new("path", ValueKind::String)
        .default(DefaultValue::Str("/config/frigate.db"))],
};
