//! # frigate-config-schema
//!
//! Camera configuration schema, validation, and normalization for the
//! Frigate config editor. This crate depends on `shared` only.

/// Camera set editing on raw documents.
pub mod edit;
/// Editor environment variable parsing.
pub mod env;
/// Validation error types.
pub mod errors;
/// Document loading and serialization.
pub mod load;
/// Dotted field paths.
pub mod path;
/// Conditional cross-field rules.
pub mod rules;
/// Schema model types.
pub mod schema;
/// Section declarations.
pub mod sections;
/// Starter camera templates.
pub mod template;
/// Document validation and normalization.
pub mod validate;
/// Untyped document values.
pub mod value;

pub use edit::{cameras, remove_camera, upsert_camera};
pub use env::{ENV_CONFIG_FILE, ENV_LOG, ENV_OUTPUT, EditorEnv, EnvParseError, OutputFormat};
pub use errors::{ValidationError, ValidationErrorKind, ValidationErrors};
pub use load::{
    DocumentFormat, load_document, parse_document, parse_json, parse_toml, parse_yaml,
    save_document, to_pretty_json, to_pretty_toml, to_pretty_yaml,
};
pub use path::{FieldPath, PathSegment};
pub use rules::{Condition, ConditionalRule, Predicate, RULES, Requirement, RuleScope};
pub use schema::{
    DefaultValue, EnumSpec, NumericRange, Schema, SchemaDefect, SchemaNode, Section, ValueKind,
};
pub use template::{
    TEMPLATE_STREAM_PATH, camera_document_template, camera_template, section_defaults,
};
pub use validate::{Document, ValidationOutcome, Validator, is_valid_camera_name, validate};
pub use value::{ConfigMap, ConfigValue};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use frigate_config_shared::shared_crate_version;

    #[test]
    fn crate_versions_are_set() {
        assert!(!config_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
