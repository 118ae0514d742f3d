//! Schema command handler.

use crate::CliOutput;
use crate::error::CliError;
use crate::format::OutputMode;
use frigate_config_schema::{DefaultValue, Schema, SchemaNode, Section};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Serialize)]
struct SectionSummary {
    name: &'static str,
    doc: &'static str,
    fields: usize,
}

#[derive(Serialize)]
struct SectionDetail {
    name: &'static str,
    doc: &'static str,
    fields: Vec<FieldDetail>,
}

#[derive(Serialize)]
struct FieldDetail {
    name: &'static str,
    kind: String,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    #[serde(skip_serializing_if = "str::is_empty")]
    doc: &'static str,
}

impl FieldDetail {
    fn from_node(node: &SchemaNode) -> Self {
        let default = node.default.as_ref().map(|default| match default {
            DefaultValue::Section => "section defaults".to_owned(),
            other => other.materialize(&node.kind).to_string(),
        });
        Self {
            name: node.name,
            kind: node.kind.describe(),
            required: node.required,
            default,
            range: node.range.map(|range| range.to_string()),
            doc: node.doc,
        }
    }
}

/// List sections, or describe one section's fields.
pub fn run_schema(mode: OutputMode, section: Option<&str>) -> Result<CliOutput, CliError> {
    let stdout = match section {
        None => list_sections(mode)?,
        Some(name) => {
            let section = Schema::section(name).ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "unknown section {name:?}; run `fcfg schema` to list sections"
                ))
            })?;
            describe_section(mode, section)?
        },
    };
    Ok(CliOutput::ok(stdout))
}

fn list_sections(mode: OutputMode) -> Result<String, CliError> {
    let summaries: Vec<SectionSummary> = Schema::sections()
        .iter()
        .map(|section| SectionSummary {
            name: section.name,
            doc: section.doc,
            fields: section.fields.len(),
        })
        .collect();

    if mode.is_json() || mode.is_yaml() {
        return mode.render(&summaries);
    }

    let width = summaries
        .iter()
        .map(|summary| summary.name.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for summary in &summaries {
        let _ = writeln!(out, "{:<width$}  {}", summary.name, summary.doc);
    }
    Ok(out)
}

fn describe_section(mode: OutputMode, section: &Section) -> Result<String, CliError> {
    let detail = SectionDetail {
        name: section.name,
        doc: section.doc,
        fields: section.fields.iter().map(FieldDetail::from_node).collect(),
    };

    if mode.is_json() || mode.is_yaml() {
        return mode.render(&detail);
    }

    let mut out = format!("section: {}\n{}\n\n", detail.name, detail.doc);
    for field in &detail.fields {
        let _ = write!(out, "{}: {}", field.name, field.kind);
        if field.required {
            out.push_str(", required");
        }
        if let Some(default) = &field.default {
            let _ = write!(out, ", default {default}");
        }
        if let Some(range) = &field.range {
            let _ = write!(out, ", {range}");
        }
        if !field.doc.is_empty() {
            let _ = write!(out, "  # {}", field.doc);
        }
        out.push('\n');
    }
    Ok(out)
}
