//! Declarative schema model.
//!
//! A schema is a tree of `Section`s, each an ordered list of `SchemaNode`
//! field declarations. Declarations are plain `static` data (see
//! `sections`); the validator and template generator interpret them.

use crate::sections;
use crate::value::{ConfigMap, ConfigValue};
use frigate_config_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Allowed values for an enumerated string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumSpec {
    /// Canonical values, in display order.
    pub values: &'static [&'static str],
    /// Accept any ASCII casing and rewrite to the canonical value.
    pub case_insensitive: bool,
}

impl EnumSpec {
    /// Case-sensitive enumeration.
    #[must_use]
    pub const fn exact(values: &'static [&'static str]) -> Self {
        Self {
            values,
            case_insensitive: false,
        }
    }

    /// Case-insensitive enumeration.
    #[must_use]
    pub const fn ignore_case(values: &'static [&'static str]) -> Self {
        Self {
            values,
            case_insensitive: true,
        }
    }

    /// Returns the canonical value matching `input`, if any.
    #[must_use]
    pub fn canonical(&self, input: &str) -> Option<&'static str> {
        self.values.iter().copied().find(|value| {
            if self.case_insensitive {
                value.eq_ignore_ascii_case(input)
            } else {
                *value == input
            }
        })
    }

    /// Renders the set as `{a, b, c}`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{{{}}}", self.values.join(", "))
    }
}

/// The shape a field accepts.
#[derive(Debug, Clone, Copy)]
pub enum ValueKind {
    /// Any string.
    String,
    /// Whole number.
    Integer,
    /// Number; integers are accepted as-is.
    Float,
    /// `true` / `false`.
    Boolean,
    /// One string out of a fixed set.
    Enum(EnumSpec),
    /// Nested section.
    Object(&'static Section),
    /// Sequence of one element kind.
    List(&'static ValueKind),
    /// String-keyed mapping of one value kind.
    Map(&'static ValueKind),
}

impl ValueKind {
    /// Human-readable kind name used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::String => "string".to_owned(),
            Self::Integer => "integer".to_owned(),
            Self::Float => "float".to_owned(),
            Self::Boolean => "boolean".to_owned(),
            Self::Enum(spec) => format!("one of {}", spec.describe()),
            Self::Object(section) => format!("{} section", section.name),
            Self::List(element) => format!("list of {}", element.describe()),
            Self::Map(value) => format!("mapping of {}", value.describe()),
        }
    }

    const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    /// Lower bound, if any.
    pub min: Option<f64>,
    /// Upper bound, if any.
    pub max: Option<f64>,
}

impl NumericRange {
    /// `min <= value <= max`.
    #[must_use]
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// `value >= min`.
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Returns true when `value` is within bounds.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(formatter, "between {min} and {max}"),
            (Some(min), None) => write!(formatter, ">= {min}"),
            (None, Some(max)) => write!(formatter, "<= {max}"),
            (None, None) => formatter.write_str("any number"),
        }
    }
}

/// Constant default for an optional field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// Boolean constant.
    Bool(bool),
    /// Integer constant.
    Integer(i64),
    /// Float constant.
    Float(f64),
    /// String constant.
    Str(&'static str),
    /// List of strings.
    StrList(&'static [&'static str]),
    /// Empty list.
    EmptyList,
    /// Empty mapping.
    EmptyMap,
    /// The nested section's own default instance.
    Section,
}

impl DefaultValue {
    /// Build a fresh value for a field of the given kind.
    #[must_use]
    pub fn materialize(&self, kind: &ValueKind) -> ConfigValue {
        match self {
            Self::Bool(value) => ConfigValue::Bool(*value),
            Self::Integer(value) => ConfigValue::Integer(*value),
            Self::Float(value) => ConfigValue::Float(*value),
            Self::Str(value) => ConfigValue::from(*value),
            Self::StrList(values) => {
                ConfigValue::List(values.iter().copied().map(ConfigValue::from).collect())
            },
            Self::EmptyList => ConfigValue::List(Vec::new()),
            Self::EmptyMap => ConfigValue::Map(ConfigMap::new()),
            Self::Section => match kind {
                ValueKind::Object(section) => section.default_instance(),
                _ => ConfigValue::Map(ConfigMap::new()),
            },
        }
    }
}

/// One field declaration.
#[derive(Debug, Clone, Copy)]
pub struct SchemaNode {
    /// Key in the enclosing mapping.
    pub name: &'static str,
    /// Accepted shape.
    pub kind: ValueKind,
    /// Absence is an error.
    pub required: bool,
    /// Value filled in when absent.
    pub default: Option<DefaultValue>,
    /// Numeric bounds.
    pub range: Option<NumericRange>,
    /// Strings and lists must not be empty when present.
    pub non_empty: bool,
    /// One-line description.
    pub doc: &'static str,
}

impl SchemaNode {
    /// Optional field without default.
    #[must_use]
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            range: None,
            non_empty: false,
            doc: "",
        }
    }

    /// Mark the field as required.
    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Set the default value.
    #[must_use]
    pub const fn default(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    /// Set numeric bounds.
    #[must_use]
    pub const fn range(self, range: NumericRange) -> Self {
        Self {
            range: Some(range),
            ..self
        }
    }

    /// Reject empty strings and lists.
    #[must_use]
    pub const fn non_empty(self) -> Self {
        Self {
            non_empty: true,
            ..self
        }
    }

    /// Attach a description.
    #[must_use]
    pub const fn doc(self, doc: &'static str) -> Self {
        Self { doc, ..self }
    }
}

/// Named, ordered group of fields.
#[derive(Debug)]
pub struct Section {
    /// Section identifier (`camera`, `mqtt`, ...).
    pub name: &'static str,
    /// One-line description.
    pub doc: &'static str,
    /// Field declarations in document order.
    pub fields: &'static [SchemaNode],
}

impl Section {
    /// Look up a field declaration.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static SchemaNode> {
        self.fields.iter().find(|node| node.name == name)
    }

    /// Fully defaulted instance: every field with a default, in declared
    /// order. Fields without a default are omitted.
    #[must_use]
    pub fn default_instance(&self) -> ConfigValue {
        let map = self
            .fields
            .iter()
            .filter_map(|node| {
                let default = node.default.as_ref()?;
                Some((node.name.to_owned(), default.materialize(&node.kind)))
            })
            .collect::<ConfigMap>();
        ConfigValue::Map(map)
    }
}

/// Entry point to the built-in schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct Schema;

impl Schema {
    /// The document root section.
    #[must_use]
    pub fn root() -> &'static Section {
        &sections::ROOT
    }

    /// Every section, root first.
    #[must_use]
    pub fn sections() -> &'static [&'static Section] {
        sections::ALL
    }

    /// Look up a section by name.
    #[must_use]
    pub fn section(name: &str) -> Option<&'static Section> {
        Self::sections()
            .iter()
            .copied()
            .find(|section| section.name == name)
    }

    /// Check the declarations for internal consistency.
    pub fn verify() -> Result<(), SchemaDefect> {
        Self::sections()
            .iter()
            .try_for_each(|section| verify_section(section))
    }
}

/// Inconsistency in the schema declarations themselves.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaDefect {
    /// Two fields share a name.
    #[error("{section}.{field} is declared twice")]
    DuplicateField {
        /// Section name.
        section: &'static str,
        /// Field name.
        field: &'static str,
    },
    /// A required field also declares a default.
    #[error("{section}.{field} is required but has a default")]
    RequiredWithDefault {
        /// Section name.
        section: &'static str,
        /// Field name.
        field: &'static str,
    },
    /// A range on a non-numeric field.
    #[error("{section}.{field} has a range but is not numeric")]
    RangeOnNonNumeric {
        /// Section name.
        section: &'static str,
        /// Field name.
        field: &'static str,
    },
    /// `min > max`.
    #[error("{section}.{field} has an inverted range")]
    InvertedRange {
        /// Section name.
        section: &'static str,
        /// Field name.
        field: &'static str,
    },
    /// An enumeration with no values or non-canonical values.
    #[error("{section}.{field} has an invalid enumeration: {reason}")]
    InvalidEnum {
        /// Section name.
        section: &'static str,
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// `non_empty` on a kind that cannot be empty.
    #[error("{section}.{field} is marked non-empty but is neither a string nor a list")]
    NonEmptyOnScalar {
        /// Section name.
        section: &'static str,
        /// Field name.
        field: &'static str,
    },
    /// Default value does not fit the field.
    #[error("{section}.{field} default does not match the field: {reason}")]
    InvalidDefault {
        /// Section name.
        section: &'static str,
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl From<SchemaDefect> for ErrorEnvelope {
    fn from(defect: SchemaDefect) -> Self {
        let message = defect.to_string();
        let (section, field) = match &defect {
            SchemaDefect::DuplicateField { section, field }
            | SchemaDefect::RequiredWithDefault { section, field }
            | SchemaDefect::RangeOnNonNumeric { section, field }
            | SchemaDefect::InvertedRange { section, field }
            | SchemaDefect::InvalidEnum { section, field, .. }
            | SchemaDefect::NonEmptyOnScalar { section, field }
            | SchemaDefect::InvalidDefault { section, field, .. } => (*section, *field),
        };
        Self::invariant(ErrorCode::new("config", "schema_defect"), message)
            .with_metadata("section", section)
            .with_metadata("field", field)
    }
}

pub(crate) fn verify_section(section: &Section) -> Result<(), SchemaDefect> {
    for (position, node) in section.fields.iter().enumerate() {
        let mut earlier = section.fields.iter().take(position);
        if earlier.any(|other| other.name == node.name) {
            return Err(SchemaDefect::DuplicateField {
                section: section.name,
                field: node.name,
            });
        }
        verify_node(section.name, node)?;
    }
    Ok(())
}

fn verify_node(section: &'static str, node: &SchemaNode) -> Result<(), SchemaDefect> {
    let field = node.name;

    if node.required && node.default.is_some() {
        return Err(SchemaDefect::RequiredWithDefault { section, field });
    }

    if let Some(range) = node.range {
        if !node.kind.is_numeric() {
            return Err(SchemaDefect::RangeOnNonNumeric { section, field });
        }
        if let (Some(min), Some(max)) = (range.min, range.max) {
            if min > max {
                return Err(SchemaDefect::InvertedRange { section, field });
            }
        }
    }

    if node.non_empty && !matches!(node.kind, ValueKind::String | ValueKind::List(_)) {
        return Err(SchemaDefect::NonEmptyOnScalar { section, field });
    }

    verify_enums(section, field, &node.kind)?;

    if let Some(default) = node.default {
        verify_default(node, default)
            .map_err(|reason| SchemaDefect::InvalidDefault { section, field, reason })?;
    }

    Ok(())
}

fn verify_enums(
    section: &'static str,
    field: &'static str,
    kind: &ValueKind,
) -> Result<(), SchemaDefect> {
    match kind {
        ValueKind::Enum(spec) => {
            if spec.values.is_empty() {
                return Err(SchemaDefect::InvalidEnum {
                    section,
                    field,
                    reason: "no values",
                });
            }
            let non_canonical = spec
                .values
                .iter()
                .any(|value| *value != value.to_ascii_lowercase());
            if spec.case_insensitive && non_canonical {
                return Err(SchemaDefect::InvalidEnum {
                    section,
                    field,
                    reason: "case-insensitive values must be lowercase",
                });
            }
            Ok(())
        },
        ValueKind::List(element) | ValueKind::Map(element) => verify_enums(section, field, element),
        _ => Ok(()),
    }
}

fn verify_default(node: &SchemaNode, default: DefaultValue) -> Result<(), &'static str> {
    match (&node.kind, default) {
        (ValueKind::Boolean, DefaultValue::Bool(_))
        | (ValueKind::String, DefaultValue::Str(_))
        | (ValueKind::List(ValueKind::String), DefaultValue::StrList(_))
        | (ValueKind::List(_), DefaultValue::EmptyList)
        | (ValueKind::Map(_), DefaultValue::EmptyMap)
        | (ValueKind::Object(_), DefaultValue::Section) => Ok(()),
        (ValueKind::Integer, DefaultValue::Integer(value)) => {
            #[expect(
                clippy::cast_precision_loss,
                reason = "declared defaults are small integers"
            )]
            let value = value as f64;
            check_default_range(node.range, value)
        },
        (ValueKind::Float, DefaultValue::Float(value)) => check_default_range(node.range, value),
        (ValueKind::Enum(spec), DefaultValue::Str(value)) => {
            if spec.values.contains(&value) {
                Ok(())
            } else {
                Err("value is not in the enumeration")
            }
        },
        (ValueKind::List(ValueKind::Enum(spec)), DefaultValue::StrList(values)) => {
            if values.iter().all(|value| spec.values.contains(value)) {
                Ok(())
            } else {
                Err("value is not in the enumeration")
            }
        },
        _ => Err("kind mismatch"),
    }
}

fn check_default_range(range: Option<NumericRange>, value: f64) -> Result<(), &'static str> {
    match range {
        Some(range) if !range.contains(value) => Err("value is out of range"),
        _ => Ok(()),
    }
}
