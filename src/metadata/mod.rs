//! Component metadata: the `metadata.json` schema and its defaulting pass.
//!
//! Parsing happens in two steps. The raw document is deserialized into
//! `Raw*` structs where every key is optional, then one defaulting pass per
//! entity turns it into [`ComponentMetadata`], [`GhPythonSettings`] and
//! [`ParamSpec`] values with every default and enumerated option resolved.
//! Nothing downstream ever sees an unresolved value.

use crate::error::ValidationError;
use crate::options::{self, OptionValue};
use serde::Deserialize;
use uuid::Uuid;

/// Raw `metadata.json` document.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadata {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub exposure: Option<OptionValue>,
    pub instance_guid: Option<String>,
    pub ghpython: Option<RawGhPython>,
}

/// Raw `ghpython` settings block.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGhPython {
    pub hide_output: Option<bool>,
    pub hide_input: Option<bool>,
    pub is_advanced_mode: Option<bool>,
    pub icon_display: Option<i32>,
    pub marshal_out_guids: Option<bool>,
    pub input_parameters: Option<Vec<RawParam>>,
    pub output_parameters: Option<Vec<RawParam>>,
}

/// Raw parameter entry, shared by inputs and outputs.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParam {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub description: Option<String>,
    pub optional: Option<bool>,
    pub allow_tree_access: Option<bool>,
    pub show_type_hints: Option<bool>,
    pub script_param_access: Option<OptionValue>,
    #[serde(rename = "typeHintID")]
    pub type_hint_id: Option<OptionValue>,
    pub wire_display: Option<OptionValue>,
}

/// Fully resolved component metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentMetadata {
    pub name: String,
    pub nickname: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    /// Resolved exposure code.
    pub exposure: i32,
    /// Authored stable identity, `None` when absent or unparseable.
    pub instance_guid: Option<Uuid>,
    pub ghpython: GhPythonSettings,
}

/// Script component settings.
#[derive(Clone, Debug, PartialEq)]
pub struct GhPythonSettings {
    pub hide_output: bool,
    pub hide_input: bool,
    pub is_advanced_mode: bool,
    pub icon_display: i32,
    pub marshal_out_guids: bool,
    pub input_parameters: Vec<ParamSpec>,
    pub output_parameters: Vec<ParamSpec>,
}

impl Default for GhPythonSettings {
    fn default() -> Self {
        Self {
            hide_output: true,
            hide_input: true,
            is_advanced_mode: false,
            icon_display: 0,
            marshal_out_guids: true,
            input_parameters: Vec::new(),
            output_parameters: Vec::new(),
        }
    }
}

/// Direction of a parameter; drives which defaults apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Input,
    Output,
}

impl ParamKind {
    fn list_key(self) -> &'static str {
        match self {
            Self::Input => "inputParameters",
            Self::Output => "outputParameters",
        }
    }
}

/// A resolved script parameter.
///
/// The input-only fields are still resolved for outputs so that every
/// [`ParamSpec`] is complete; the tree builder only emits them for inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamSpec {
    pub kind: ParamKind,
    pub name: String,
    pub nickname: String,
    pub description: String,
    pub optional: bool,
    pub allow_tree_access: bool,
    pub show_type_hints: bool,
    pub script_param_access: i32,
    pub type_hint_id: Uuid,
    pub wire_display: i32,
}

/// Parses and resolves a `metadata.json` document.
pub fn parse_metadata(json: &str) -> Result<ComponentMetadata, ValidationError> {
    let raw: RawMetadata = serde_json::from_str(json)?;
    ComponentMetadata::resolve(raw)
}

fn required(value: Option<String>, field: &str) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField {
            field: field.to_string(),
        }),
    }
}

/// Prefixes the field of a validation error with its location in the document.
fn located(err: ValidationError, prefix: &str) -> ValidationError {
    match err {
        ValidationError::MissingField { field } => ValidationError::MissingField {
            field: format!("{prefix}.{field}"),
        },
        ValidationError::InvalidOption { field, value, valid } => ValidationError::InvalidOption {
            field: format!("{prefix}.{field}"),
            value,
            valid,
        },
        ValidationError::InvalidValue { field, reason } => ValidationError::InvalidValue {
            field: format!("{prefix}.{field}"),
            reason,
        },
        other => other,
    }
}

impl ComponentMetadata {
    /// Defaulting pass for the top-level document.
    pub fn resolve(raw: RawMetadata) -> Result<Self, ValidationError> {
        let name = required(raw.name, "name")?;
        let nickname = required(raw.nickname, "nickname")?;
        let category = required(raw.category, "category")?;
        let subcategory = required(raw.subcategory, "subcategory")?;
        let exposure = options::resolve_exposure(raw.exposure.as_ref())?;

        let ghpython = raw.ghpython.ok_or_else(|| ValidationError::MissingField {
            field: "ghpython".to_string(),
        })?;
        let ghpython = GhPythonSettings::resolve(ghpython)?;

        let instance_guid = match raw.instance_guid.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => match Uuid::parse_str(text) {
                Ok(guid) => Some(guid),
                Err(e) => {
                    log::warn!(
                        "{name}: instanceGuid \"{text}\" is not a valid GUID ({e}); a new one will be generated"
                    );
                    None
                }
            },
        };

        Ok(Self {
            name,
            nickname,
            description: raw.description.unwrap_or_default(),
            category,
            subcategory,
            exposure,
            instance_guid,
            ghpython,
        })
    }
}

impl GhPythonSettings {
    /// Defaulting pass for the `ghpython` block.
    pub fn resolve(raw: RawGhPython) -> Result<Self, ValidationError> {
        let defaults = Self::default();
        Ok(Self {
            hide_output: raw.hide_output.unwrap_or(defaults.hide_output),
            hide_input: raw.hide_input.unwrap_or(defaults.hide_input),
            is_advanced_mode: raw.is_advanced_mode.unwrap_or(defaults.is_advanced_mode),
            icon_display: raw.icon_display.unwrap_or(defaults.icon_display),
            marshal_out_guids: raw.marshal_out_guids.unwrap_or(defaults.marshal_out_guids),
            input_parameters: resolve_params(raw.input_parameters, ParamKind::Input)?,
            output_parameters: resolve_params(raw.output_parameters, ParamKind::Output)?,
        })
    }
}

fn resolve_params(
    raw: Option<Vec<RawParam>>,
    kind: ParamKind,
) -> Result<Vec<ParamSpec>, ValidationError> {
    raw.unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, param)| {
            ParamSpec::resolve(param, kind)
                .map_err(|e| located(e, &format!("ghpython.{}[{i}]", kind.list_key())))
        })
        .collect()
}

impl ParamSpec {
    /// Defaulting pass for one parameter.
    pub fn resolve(raw: RawParam, kind: ParamKind) -> Result<Self, ValidationError> {
        let name = required(raw.name, "name")?;
        let nickname = raw
            .nickname
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| name.clone());

        Ok(Self {
            kind,
            nickname,
            description: raw.description.unwrap_or_default(),
            optional: raw.optional.unwrap_or(kind == ParamKind::Input),
            allow_tree_access: raw.allow_tree_access.unwrap_or(true),
            show_type_hints: raw.show_type_hints.unwrap_or(true),
            script_param_access: options::resolve_access(raw.script_param_access.as_ref())?,
            type_hint_id: options::resolve_type_hint(raw.type_hint_id.as_ref())?,
            wire_display: options::resolve_wire_display(raw.wire_display.as_ref())?,
            name,
        })
    }
}
