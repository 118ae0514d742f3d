//! Schema-driven validation and normalization.
//!
//! `Validator::validate` walks the raw document against the built-in
//! schema, fills defaults, canonicalizes enumerations, then evaluates the
//! conditional rules. Every problem is collected; nothing short-circuits
//! except a root that is not a mapping.

use crate::errors::{ValidationError, ValidationErrorKind, ValidationErrors};
use crate::path::FieldPath;
use crate::rules::{self, RULES};
use crate::schema::{NumericRange, Schema, SchemaDefect, SchemaNode, Section, ValueKind};
use crate::value::{ConfigMap, ConfigValue};
use serde::Serialize;

/// Normalized configuration document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(ConfigValue);

impl Document {
    /// All cameras, in document order.
    pub fn cameras(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.0
            .get("cameras")
            .and_then(ConfigValue::as_map)
            .into_iter()
            .flat_map(ConfigMap::iter)
    }

    /// One camera by name.
    #[must_use]
    pub fn camera(&self, name: &str) -> Option<&ConfigValue> {
        self.0.get("cameras").and_then(|cameras| cameras.get(name))
    }

    /// Value at a dotted path (`cameras.back.detect.fps`).
    #[must_use]
    pub fn get(&self, dotted: &str) -> Option<&ConfigValue> {
        FieldPath::parse(dotted).resolve(&self.0)
    }

    /// The underlying tree.
    #[must_use]
    pub const fn as_value(&self) -> &ConfigValue {
        &self.0
    }

    /// Take the underlying tree.
    #[must_use]
    pub fn into_value(self) -> ConfigValue {
        self.0
    }
}

/// Result of validating one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Normalized document; `None` when there are errors.
    pub normalized: Option<Document>,
    /// Every problem found.
    pub errors: Vec<ValidationError>,
}

impl ValidationOutcome {
    /// Returns true when no errors were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.normalized.is_some()
    }

    /// Convert into a `Result`.
    pub fn into_result(self) -> Result<Document, ValidationErrors> {
        match self.normalized {
            Some(document) if self.errors.is_empty() => Ok(document),
            _ => Err(ValidationErrors::new(self.errors)),
        }
    }
}

/// Validator bound to the built-in schema.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    root: &'static Section,
}

impl Validator {
    /// Verify the schema declarations and build a validator.
    pub fn new() -> Result<Self, SchemaDefect> {
        Schema::verify()?;
        Ok(Self {
            root: Schema::root(),
        })
    }

    /// Validate and normalize a raw document. The input is not modified.
    pub fn validate(&self, raw: &ConfigValue) -> ValidationOutcome {
        let span = tracing::debug_span!("validate_config");
        let _guard = span.enter();

        let mut walk = Walk::default();
        let root = FieldPath::root();

        let empty = ConfigMap::new();
        let root_map = match raw {
            ConfigValue::Absent => &empty,
            ConfigValue::Map(map) => map,
            other => {
                walk.errors.push(
                    ValidationError::new(
                        root,
                        ValidationErrorKind::Structural,
                        "configuration root must be a mapping",
                    )
                    .expected("mapping")
                    .actual(other.kind_name()),
                );
                return walk.finish(None);
            },
        };

        walk.check_structure(root_map);
        let normalized = ConfigValue::Map(walk.check_section(self.root, root_map, &root));
        rules::evaluate(RULES, &normalized, &mut walk.errors);

        walk.finish(Some(normalized))
    }
}

/// One-shot validation with a freshly verified schema.
///
/// A schema defect is a programming fault, not bad input, so it is returned
/// as `Err` instead of being folded into the outcome's errors.
///
/// ```
/// use frigate_config_schema::{parse_yaml, validate};
///
/// let raw = parse_yaml("cameras: {}").unwrap();
/// assert!(validate(&raw).unwrap().is_valid());
/// ```
pub fn validate(raw: &ConfigValue) -> Result<ValidationOutcome, SchemaDefect> {
    let validator = Validator::new().inspect_err(|defect| {
        tracing::error!(%defect, "schema declarations are inconsistent");
    })?;
    Ok(validator.validate(raw))
}

/// Returns true when `name` is a usable camera name (`[A-Za-z0-9_-]+`).
#[must_use]
pub fn is_valid_camera_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-')
}

#[derive(Default)]
struct Walk {
    errors: Vec<ValidationError>,
    // Paths already reported as structural problems; the schema walk leaves them alone.
    skip: Vec<FieldPath>,
    defaults_applied: usize,
}

impl Walk {
    fn finish(self, normalized: Option<ConfigValue>) -> ValidationOutcome {
        let valid = self.errors.is_empty();
        tracing::debug!(defaults_applied = self.defaults_applied, "defaults filled");
        tracing::info!(valid, errors = self.errors.len(), "configuration validated");
        ValidationOutcome {
            normalized: normalized.filter(|_| valid).map(Document),
            errors: self.errors,
        }
    }

    fn check_structure(&mut self, root: &ConfigMap) {
        let cameras_path = FieldPath::root().key("cameras");
        let cameras = match root.get("cameras") {
            None | Some(ConfigValue::Absent) => return,
            Some(ConfigValue::Map(map)) => map,
            Some(other) => {
                self.errors.push(
                    ValidationError::new(
                        cameras_path.clone(),
                        ValidationErrorKind::Structural,
                        "cameras must be a mapping of camera name to camera",
                    )
                    .expected("mapping")
                    .actual(other.kind_name()),
                );
                self.skip.push(cameras_path);
                return;
            },
        };

        for (name, camera) in cameras.iter() {
            let path = cameras_path.key(name);
            if !is_valid_camera_name(name) {
                self.errors.push(
                    ValidationError::new(
                        path.clone(),
                        ValidationErrorKind::ConstraintViolation,
                        "camera name may only contain letters, digits, '_' and '-'",
                    )
                    .expected("[A-Za-z0-9_-]+")
                    .actual(name),
                );
            }
            if !matches!(camera, ConfigValue::Map(_)) {
                self.errors.push(
                    ValidationError::new(
                        path.clone(),
                        ValidationErrorKind::Structural,
                        "camera must be a mapping",
                    )
                    .expected("mapping")
                    .actual(camera.kind_name()),
                );
                self.skip.push(path);
            }
        }
    }

    fn check_section(
        &mut self,
        section: &Section,
        raw: &ConfigMap,
        path: &FieldPath,
    ) -> ConfigMap {
        let mut out = ConfigMap::new();

        for (key, value) in raw.iter() {
            match section.field(key) {
                Some(_) if value.is_absent() => {},
                Some(node) => {
                    let checked = self.check_node(node, value, &path.key(key));
                    out.insert(key, checked);
                },
                None => {
                    tracing::debug!(
                        section = section.name,
                        key,
                        at = %path,
                        "preserving unknown key"
                    );
                    out.insert(key, value.clone());
                },
            }
        }

        for node in section.fields {
            if raw.get(node.name).is_some_and(|value| !value.is_absent()) {
                continue;
            }
            if let Some(filled) = self.fill_absent(node, &path.key(node.name)) {
                out.insert(node.name, filled);
            }
        }

        out
    }

    fn fill_absent(&mut self, node: &SchemaNode, path: &FieldPath) -> Option<ConfigValue> {
        if node.required {
            if let ValueKind::Object(section) = node.kind {
                return Some(ConfigValue::Map(self.check_section(
                    section,
                    &ConfigMap::new(),
                    path,
                )));
            }
            self.errors.push(
                ValidationError::new(
                    path.clone(),
                    ValidationErrorKind::MissingRequired,
                    "field is required",
                )
                .expected(node.kind.describe()),
            );
            return None;
        }

        let default = node.default.as_ref()?;
        self.defaults_applied += 1;
        Some(default.materialize(&node.kind))
    }

    fn check_node(
        &mut self,
        node: &SchemaNode,
        value: &ConfigValue,
        path: &FieldPath,
    ) -> ConfigValue {
        let reported = self.errors.len();
        let checked = self.check_value(&node.kind, node.range, value, path);
        if node.non_empty && self.errors.len() == reported && is_empty_value(&checked) {
            let shape = if matches!(node.kind, ValueKind::List(_)) {
                "list"
            } else {
                "string"
            };
            self.errors.push(
                ValidationError::new(
                    path.clone(),
                    ValidationErrorKind::ConstraintViolation,
                    format!("{shape} must not be empty"),
                )
                .expected(format!("non-empty {shape}")),
            );
        }
        checked
    }

    fn check_value(
        &mut self,
        kind: &ValueKind,
        range: Option<NumericRange>,
        value: &ConfigValue,
        path: &FieldPath,
    ) -> ConfigValue {
        if self.skip.contains(path) {
            return value.clone();
        }

        match (kind, value) {
            (ValueKind::String, ConfigValue::String(_))
            | (ValueKind::Boolean, ConfigValue::Bool(_)) => value.clone(),
            (ValueKind::Integer, ConfigValue::Integer(_))
            | (ValueKind::Float, ConfigValue::Integer(_) | ConfigValue::Float(_)) => {
                self.check_range(range, value, path);
                value.clone()
            },
            (ValueKind::Enum(spec), ConfigValue::String(text)) => {
                if let Some(canonical) = spec.canonical(text) {
                    return ConfigValue::from(canonical);
                }
                self.errors.push(
                    ValidationError::new(
                        path.clone(),
                        ValidationErrorKind::ConstraintViolation,
                        format!("\"{text}\" is not one of {}", spec.describe()),
                    )
                    .expected(spec.describe())
                    .actual(text.as_str()),
                );
                value.clone()
            },
            (ValueKind::Object(section), ConfigValue::Map(map)) => {
                ConfigValue::Map(self.check_section(section, map, path))
            },
            (ValueKind::List(element), ConfigValue::List(items)) => ConfigValue::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| self.check_value(element, None, item, &path.index(index)))
                    .collect(),
            ),
            (ValueKind::Map(element), ConfigValue::Map(map)) => ConfigValue::Map(
                map.iter()
                    .map(|(key, item)| {
                        let checked = self.check_value(element, None, item, &path.key(key));
                        (key.to_owned(), checked)
                    })
                    .collect(),
            ),
            _ => {
                let expected = match kind {
                    ValueKind::Enum(_) => "string".to_owned(),
                    ValueKind::Object(_) | ValueKind::Map(_) => "mapping".to_owned(),
                    other => other.describe(),
                };
                self.errors.push(
                    ValidationError::new(
                        path.clone(),
                        ValidationErrorKind::TypeMismatch,
                        format!("expected {expected}, found {}", value.kind_name()),
                    )
                    .expected(expected)
                    .actual(value.kind_name()),
                );
                value.clone()
            },
        }
    }

    fn check_range(&mut self, range: Option<NumericRange>, value: &ConfigValue, path: &FieldPath) {
        let (Some(range), Some(number)) = (range, value.as_f64()) else {
            return;
        };
        if range.contains(number) {
            return;
        }
        self.errors.push(
            ValidationError::new(
                path.clone(),
                ValidationErrorKind::ConstraintViolation,
                format!("{value} is not {range}"),
            )
            .expected(range.to_string())
            .actual(value.to_string()),
        );
    }
}

fn is_empty_value(value: &ConfigValue) -> bool {
    match value {
        ConfigValue::String(text) => text.trim().is_empty(),
        ConfigValue::List(items) => items.is_empty(),
        _ => false,
    }
}
