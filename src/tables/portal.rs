//! Service Portal tables: widgets, their dependencies and included assets.

use crate::core::record::RecordBase;
use crate::core::wire::{bool_string, int_string};
use crate::impl_record;
use serde::{Deserialize, Serialize};

/// A Service Portal widget.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Widget {
    #[serde(flatten)]
    pub base: RecordBase,
    /// The widget id used in portal markup, distinct from `sys_id`.
    #[serde(rename = "id")]
    pub custom_id: String,
    pub name: String,
    pub template: String,
    pub css: String,
    #[serde(with = "bool_string")]
    pub public: bool,
    pub roles: String,
    pub link: String,
    pub description: String,
    pub client_script: String,
    #[serde(rename = "script")]
    pub server_script: String,
    pub demo_data: String,
    pub option_schema: String,
    #[serde(with = "bool_string")]
    pub has_preview: bool,
    pub data_table: String,
    pub controller_as: String,
}

impl_record!(Widget, "sp_widget.do");

/// A widget dependency bundle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetDependency {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    pub module: String,
    #[serde(with = "bool_string")]
    pub page_load: bool,
}

impl_record!(WidgetDependency, "sp_dependency.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetDependencyRelation {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(rename = "sp_dependency")]
    pub dependency_id: String,
    #[serde(rename = "sp_widget")]
    pub widget_id: String,
}

impl_record!(WidgetDependencyRelation, "m2m_sp_widget_dependency.do");

/// A stylesheet included by a widget dependency.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssInclude {
    #[serde(flatten)]
    pub base: RecordBase,
    pub source: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "sp_css")]
    pub style_sheet_id: String,
}

impl_record!(CssInclude, "sp_css_include.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssIncludeRelation {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(rename = "sp_css_include")]
    pub css_include_id: String,
    #[serde(rename = "sp_dependency")]
    pub dependency_id: String,
    #[serde(with = "int_string")]
    pub order: i64,
}

impl_record!(CssIncludeRelation, "m2m_sp_dependency_css_include.do");

/// A script included by a widget dependency.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsInclude {
    #[serde(flatten)]
    pub base: RecordBase,
    pub source: String,
    pub display_name: String,
    pub url: String,
    #[serde(rename = "sys_ui_script")]
    pub ui_script_id: String,
}

impl_record!(JsInclude, "sp_js_include.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsIncludeRelation {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(rename = "sp_js_include")]
    pub js_include_id: String,
    #[serde(rename = "sp_dependency")]
    pub dependency_id: String,
    #[serde(with = "int_string")]
    pub order: i64,
}

impl_record!(JsIncludeRelation, "m2m_sp_dependency_js_include.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentCss {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub style: String,
}

impl_record!(ContentCss, "content_css.do");
