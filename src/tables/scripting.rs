use crate::core::record::RecordBase;
use crate::core::wire::bool_string;
use crate::impl_record;
use serde::{Deserialize, Serialize};

/// A server-side script include.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptInclude {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    #[serde(with = "bool_string")]
    pub client_callable: bool,
    pub description: String,
    pub script: String,
    #[serde(with = "bool_string")]
    pub active: bool,
    pub access: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_name: String,
}

impl_record!(ScriptInclude, "sys_script_include.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiMacro {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    pub description: String,
    #[serde(rename = "scoped_name")]
    pub api_name: String,
    pub xml: String,
    #[serde(with = "bool_string")]
    pub active: bool,
}

impl_record!(UiMacro, "sys_ui_macro.do");

/// A UI page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPage {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    pub description: String,
    #[serde(with = "bool_string")]
    pub direct: bool,
    pub html: String,
    pub processing_script: String,
    pub client_script: String,
    pub category: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub endpoint: String,
}

impl_record!(UiPage, "sys_ui_page.do");

/// A client-side UI script.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiScript {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(rename = "script_name")]
    pub name: String,
    #[serde(rename = "name", skip_serializing_if = "String::is_empty")]
    pub api_name: String,
    pub description: String,
    pub script: String,
    #[serde(with = "bool_string")]
    pub active: bool,
    /// All: `10`, Mobile: `1`, Desktop: `0`.
    pub ui_type: String,
}

impl_record!(UiScript, "sys_ui_script.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionPoint {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    #[serde(with = "bool_string")]
    pub restrict_scope: bool,
    pub description: String,
    pub example: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_name: String,
}

impl_record!(ExtensionPoint, "sys_extension_point.do");
