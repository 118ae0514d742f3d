//! Conditional requirements between fields.
//!
//! Rules run over the normalized tree after every section has been type
//! checked and defaulted. Paths in a rule are relative to its scope: the
//! document root, or each camera in turn.

use crate::errors::{ValidationError, ValidationErrorKind};
use crate::path::FieldPath;
use crate::value::ConfigValue;
use std::fmt;

/// Where a rule's paths are anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Paths start at the document root.
    Document,
    /// The rule runs once per camera with paths under `cameras.<name>`.
    EachCamera,
}

/// Test applied to the value at a condition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The value is this exact string.
    Equals(&'static str),
    /// The value is boolean `true`.
    IsTrue,
}

/// When a rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    /// Dotted path relative to the rule scope.
    pub path: &'static str,
    /// Test on the value found there.
    pub predicate: Predicate,
}

impl Condition {
    fn holds(&self, value: Option<&ConfigValue>) -> bool {
        match (self.predicate, value) {
            (Predicate::Equals(expected), Some(ConfigValue::String(actual))) => actual == expected,
            (Predicate::IsTrue, Some(ConfigValue::Bool(flag))) => *flag,
            _ => false,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.predicate {
            Predicate::Equals(value) => write!(formatter, "{} is \"{value}\"", self.path),
            Predicate::IsTrue => write!(formatter, "{} is true", self.path),
        }
    }
}

/// What must hold once a rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The path holds a value.
    Present(&'static str),
    /// The path holds a non-blank string or non-empty list.
    NonEmpty(&'static str),
    /// Every entry of the `list` names a key of the `keys` mapping.
    ReferencesKeys {
        /// Dotted path of a list of strings.
        list: &'static str,
        /// Dotted path of the mapping whose keys are valid names.
        keys: &'static str,
    },
}

/// A named conditional requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalRule {
    /// Stable identifier, used in logs.
    pub name: &'static str,
    /// Anchor for all paths in the rule.
    pub scope: RuleScope,
    /// Trigger; `None` means the rule always applies.
    pub when: Option<Condition>,
    /// Checks made when the rule applies.
    pub then: &'static [Requirement],
}

/// Built-in rules, in evaluation order.
pub static RULES: &[ConditionalRule] = &[
    ConditionalRule {
        name: "openai_provider_needs_credentials",
        scope: RuleScope::Document,
        when: Some(Condition {
            path: "semantic_search.provider",
            predicate: Predicate::Equals("openai"),
        }),
        then: &[
            Requirement::Present("semantic_search.openai"),
            Requirement::NonEmpty("semantic_search.openai.api_key"),
        ],
    },
    ConditionalRule {
        name: "autotracking_needs_onvif_target",
        scope: RuleScope::EachCamera,
        when: Some(Condition {
            path: "onvif.autotracking.enabled",
            predicate: Predicate::IsTrue,
        }),
        then: &[
            Requirement::NonEmpty("onvif.host"),
            Requirement::NonEmpty("onvif.autotracking.return_preset"),
        ],
    },
    ConditionalRule {
        name: "required_zones_are_declared",
        scope: RuleScope::EachCamera,
        when: None,
        then: &[
            Requirement::ReferencesKeys {
                list: "snapshots.required_zones",
                keys: "zones",
            },
            Requirement::ReferencesKeys {
                list: "record.events.required_zones",
                keys: "zones",
            },
            Requirement::ReferencesKeys {
                list: "mqtt.required_zones",
                keys: "zones",
            },
            Requirement::ReferencesKeys {
                list: "onvif.autotracking.required_zones",
                keys: "zones",
            },
        ],
    },
];

/// Evaluate `rules` over a normalized document, appending violations to
/// `errors`. A requirement is skipped when an error already sits at or below
/// its path, or when an enclosing value could not be read at all.
pub(crate) fn evaluate(
    rules: &[ConditionalRule],
    document: &ConfigValue,
    errors: &mut Vec<ValidationError>,
) {
    for rule in rules {
        for base in scope_bases(rule.scope, document) {
            evaluate_at(rule, &base, document, errors);
        }
    }
}

fn scope_bases(scope: RuleScope, document: &ConfigValue) -> Vec<FieldPath> {
    match scope {
        RuleScope::Document => vec![FieldPath::root()],
        RuleScope::EachCamera => {
            let cameras = FieldPath::root().key("cameras");
            document
                .get("cameras")
                .and_then(ConfigValue::as_map)
                .map(|map| {
                    map.iter()
                        .filter(|(_, camera)| matches!(camera, ConfigValue::Map(_)))
                        .map(|(name, _)| cameras.key(name))
                        .collect()
                })
                .unwrap_or_default()
        },
    }
}

fn evaluate_at(
    rule: &ConditionalRule,
    base: &FieldPath,
    document: &ConfigValue,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(condition) = &rule.when {
        let path = base.join(&FieldPath::parse(condition.path));
        if is_blocked(errors, &path) || !condition.holds(path.resolve(document)) {
            return;
        }
    }

    let trigger = rule.when.map(|condition| condition.to_string());
    tracing::debug!(rule = rule.name, at = %base, "conditional rule applies");

    for requirement in rule.then {
        check_requirement(requirement, trigger.as_deref(), base, document, errors);
    }
}

fn check_requirement(
    requirement: &Requirement,
    trigger: Option<&str>,
    base: &FieldPath,
    document: &ConfigValue,
    errors: &mut Vec<ValidationError>,
) {
    let suffix = trigger.map(|trigger| format!(" when {trigger}")).unwrap_or_default();

    match *requirement {
        Requirement::Present(relative) => {
            let path = base.join(&FieldPath::parse(relative));
            if !should_check(errors, &path, document) {
                return;
            }
            if path.resolve(document).is_none() {
                errors.push(
                    ValidationError::new(
                        path,
                        ValidationErrorKind::CrossField,
                        format!("section is required{suffix}"),
                    )
                    .expected("present"),
                );
            }
        },
        Requirement::NonEmpty(relative) => {
            let path = base.join(&FieldPath::parse(relative));
            if !should_check(errors, &path, document) {
                return;
            }
            let value = path.resolve(document);
            if is_blank(value) {
                let actual = value.map_or_else(|| "absent".to_owned(), ToString::to_string);
                let error = ValidationError::new(
                    path,
                    ValidationErrorKind::CrossField,
                    format!("value must not be empty{suffix}"),
                )
                .expected("non-empty value")
                .actual(actual);
                errors.push(error);
            }
        },
        Requirement::ReferencesKeys { list, keys } => {
            let list_path = base.join(&FieldPath::parse(list));
            let keys_path = base.join(&FieldPath::parse(keys));
            if is_unreadable(errors, &list_path) {
                return;
            }
            let Some(entries) = list_path.resolve(document).and_then(ConfigValue::as_list) else {
                return;
            };
            // Errors inside individual entries do not hide the declared keys.
            let declared = match keys_path.resolve(document) {
                None => None,
                Some(value) => match value.as_map() {
                    Some(map) => Some(map),
                    None => return,
                },
            };
            for (index, entry) in entries.iter().enumerate() {
                // Non-string entries already carry a type error.
                let Some(name) = entry.as_str() else {
                    continue;
                };
                if declared.is_some_and(|map| map.contains_key(name)) {
                    continue;
                }
                errors.push(
                    ValidationError::new(
                        list_path.index(index),
                        ValidationErrorKind::CrossField,
                        format!("\"{name}\" is not declared under {keys_path}"),
                    )
                    .expected(format!("a key of {keys_path}"))
                    .actual(name),
                );
            }
        },
    }
}

/// A requirement is skipped when its path is blocked, or when its parent is
/// absent (the parent's own requirement covers that case).
fn should_check(errors: &[ValidationError], path: &FieldPath, document: &ConfigValue) -> bool {
    if is_blocked(errors, path) {
        return false;
    }
    match path.parent() {
        Some(parent) if !parent.is_root() => parent.resolve(document).is_some(),
        _ => true,
    }
}

/// An error sits at or below `path`, or `path` cannot be read.
fn is_blocked(errors: &[ValidationError], path: &FieldPath) -> bool {
    is_unreadable(errors, path) || errors.iter().any(|error| error.path.starts_with(path))
}

/// `path` itself is in error, or an ancestor has the wrong shape. Constraint
/// errors on an ancestor (a bad camera name) leave the subtree readable.
fn is_unreadable(errors: &[ValidationError], path: &FieldPath) -> bool {
    errors.iter().any(|error| {
        error.path == *path
            || (path.starts_with(&error.path)
                && matches!(
                    error.kind,
                    ValidationErrorKind::Structural | ValidationErrorKind::TypeMismatch
                ))
    })
}

fn is_blank(value: Option<&ConfigValue>) -> bool {
    match value {
        None => true,
        Some(ConfigValue::String(text)) => text.trim().is_empty(),
        Some(ConfigValue::List(items)) => items.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_yaml;
    use std::error::Error;

    fn run(yaml: &str) -> Result<Vec<ValidationError>, Box<dyn Error>> {
        let document = parse_yaml(yaml)?;
        let mut errors = Vec::new();
        evaluate(RULES, &document, &mut errors);
        Ok(errors)
    }

    #[test]
    fn openai_without_section_reports_once() -> Result<(), Box<dyn Error>> {
        let errors = run("semantic_search:\n  provider: openai\n")?;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::CrossField);
        assert_eq!(errors[0].path.to_string(), "semantic_search.openai");
        Ok(())
    }

    #[test]
    fn openai_with_blank_key_reports_key() -> Result<(), Box<dyn Error>> {
        let errors = run("semantic_search:\n  provider: openai\n  openai:\n    api_key: '  '\n")?;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path.to_string(), "semantic_search.openai.api_key");
        assert_eq!(errors[0].actual.as_deref(), Some(frigate_config_shared::REDACTED));
        Ok(())
    }

    #[test]
    fn transformers_provider_needs_nothing() -> Result<(), Box<dyn Error>> {
        assert!(run("semantic_search:\n  provider: transformers\n")?.is_empty());
        assert!(run("{}")?.is_empty());
        Ok(())
    }

    #[test]
    fn autotracking_reports_every_camera() -> Result<(), Box<dyn Error>> {
        let yaml = "\
cameras:
  front:
    onvif:
      autotracking:
        enabled: true
  back:
    onvif:
      host: 10.0.0.2
      autotracking:
        enabled: true
        return_preset: home
  side:
    onvif:
      autotracking:
        enabled: false
";
        let errors = run(yaml)?;
        let paths: Vec<String> = errors.iter().map(|error| error.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "cameras.front.onvif.host",
                "cameras.front.onvif.autotracking.return_preset",
            ]
        );
        Ok(())
    }

    #[test]
    fn undeclared_required_zone_is_reported() -> Result<(), Box<dyn Error>> {
        let yaml = "\
cameras:
  back:
    zones:
      yard:
        coordinates: 0,0,1,1
    snapshots:
      required_zones: [yard, street]
    mqtt:
      required_zones: [porch]
";
        let errors = run(yaml)?;
        let paths: Vec<String> = errors.iter().map(|error| error.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "cameras.back.snapshots.required_zones[1]",
                "cameras.back.mqtt.required_zones[0]",
            ]
        );
        assert_eq!(errors[0].actual.as_deref(), Some("street"));
        Ok(())
    }

    #[test]
    fn existing_errors_suppress_duplicates() -> Result<(), Box<dyn Error>> {
        let document = parse_yaml("semantic_search:\n  provider: openai\n  openai: {}\n")?;
        let mut errors = vec![ValidationError::new(
            FieldPath::parse("semantic_search.openai.api_key"),
            ValidationErrorKind::MissingRequired,
            "field is required",
        )];
        evaluate(RULES, &document, &mut errors);
        assert_eq!(errors.len(), 1);
        Ok(())
    }

    #[test]
    fn ancestor_constraint_errors_do_not_hide_rules() -> Result<(), Box<dyn Error>> {
        let document = parse_yaml(
            "\
cameras:
  front door:
    onvif:
      autotracking:
        enabled: true
",
        )?;
        let mut errors = vec![ValidationError::new(
            FieldPath::parse("cameras").key("front door"),
            ValidationErrorKind::ConstraintViolation,
            "camera name may only contain letters, digits, '_' and '-'",
        )];
        evaluate(RULES, &document, &mut errors);
        let paths: Vec<String> = errors.iter().map(|error| error.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "cameras.front door",
                "cameras.front door.onvif.host",
                "cameras.front door.onvif.autotracking.return_preset",
            ]
        );
        Ok(())
    }

    #[test]
    fn ancestor_type_errors_hide_rules() -> Result<(), Box<dyn Error>> {
        let document = parse_yaml(
            "\
cameras:
  back:
    onvif:
      autotracking:
        enabled: true
",
        )?;
        let mut errors = vec![ValidationError::new(
            FieldPath::parse("cameras.back.onvif"),
            ValidationErrorKind::TypeMismatch,
            "expected mapping",
        )];
        evaluate(RULES, &document, &mut errors);
        assert_eq!(errors.len(), 1);
        Ok(())
    }

    #[test]
    fn zone_entry_errors_keep_reference_check() -> Result<(), Box<dyn Error>> {
        let document = parse_yaml(
            "\
cameras:
  back:
    zones:
      yard: {}
    snapshots:
      required_zones: [yard, street]
",
        )?;
        let mut errors = vec![ValidationError::new(
            FieldPath::parse("cameras.back.zones.yard.coordinates"),
            ValidationErrorKind::MissingRequired,
            "field is required",
        )];
        evaluate(RULES, &document, &mut errors);
        let paths: Vec<String> = errors.iter().map(|error| error.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "cameras.back.zones.yard.coordinates",
                "cameras.back.snapshots.required_zones[1]",
            ]
        );
        assert_eq!(errors[1].actual.as_deref(), Some("street"));
        Ok(())
    }

    #[test]
    fn non_mapping_zones_skip_reference_check() -> Result<(), Box<dyn Error>> {
        let errors = run(
            "\
cameras:
  back:
    zones: [yard]
    snapshots:
      required_zones: [street]
",
        )?;
        assert!(errors.is_empty());
        Ok(())
    }

    #[test]
    fn condition_display() {
        let condition = Condition {
            path: "semantic_search.provider",
            predicate: Predicate::Equals("openai"),
        };
        assert_eq!(condition.to_string(), "semantic_search.provider is \"openai\"");
    }
}
