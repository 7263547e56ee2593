//! Purpose: Typed records for the tables this client knows, plus a lookup registry.
//! Exports: One struct per table (each implements `Table`), `TableInfo`, `lookup`, `all`.
//! Role: Saves adapters from repeating wire names and string-encoding rules.
//! Invariants: Short names and endpoints are both unique across the registry.
//! Invariants: Typed validation never talks to the network.

mod application;
mod portal;
mod properties;
mod rest;
mod scripting;
mod security;

pub use application::{Application, ApplicationCategory, ApplicationMenu, ApplicationModule};
pub use portal::{
    ContentCss, CssInclude, CssIncludeRelation, JsInclude, JsIncludeRelation, Widget,
    WidgetDependency, WidgetDependencyRelation,
};
pub use properties::{SystemProperty, SystemPropertyCategory, SystemPropertyRelation};
pub use rest::{
    RestMessage, RestMessageHeader, RestMethod, RestMethodHeader, ScriptedRestApi,
    ScriptedRestResource,
};
pub use scripting::{ExtensionPoint, ScriptInclude, UiMacro, UiPage, UiScript};
pub use security::{Acl, DbTable, OauthEntity, Role};

use crate::core::envelope::{self, Fragment};
use crate::core::error::{Error, ErrorKind};
use crate::core::record::Table;
use serde_json::Value;

#[derive(Clone, Copy)]
pub struct TableInfo {
    pub name: &'static str,
    pub endpoint: &'static str,
    validate: fn(&Value) -> Result<(), Error>,
}

impl TableInfo {
    const fn of<T: Table>(name: &'static str) -> Self {
        Self {
            name,
            endpoint: T::ENDPOINT,
            validate: validate_as::<T>,
        }
    }

    /// Checks that `fields` decodes as this table's typed record.
    pub fn validate(&self, fields: &Value) -> Result<(), Error> {
        (self.validate)(fields).map_err(|err| err.with_endpoint(self.endpoint))
    }
}

impl std::fmt::Debug for TableInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableInfo")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

static TABLES: &[TableInfo] = &[
    TableInfo::of::<Acl>("acl"),
    TableInfo::of::<Application>("application"),
    TableInfo::of::<ApplicationCategory>("application_category"),
    TableInfo::of::<ApplicationMenu>("application_menu"),
    TableInfo::of::<ApplicationModule>("application_module"),
    TableInfo::of::<ContentCss>("content_css"),
    TableInfo::of::<CssInclude>("css_include"),
    TableInfo::of::<CssIncludeRelation>("css_include_relation"),
    TableInfo::of::<DbTable>("db_table"),
    TableInfo::of::<ExtensionPoint>("extension_point"),
    TableInfo::of::<JsInclude>("js_include"),
    TableInfo::of::<JsIncludeRelation>("js_include_relation"),
    TableInfo::of::<OauthEntity>("oauth_entity"),
    TableInfo::of::<RestMessage>("rest_message"),
    TableInfo::of::<RestMessageHeader>("rest_message_header"),
    TableInfo::of::<RestMethod>("rest_method"),
    TableInfo::of::<RestMethodHeader>("rest_method_header"),
    TableInfo::of::<Role>("role"),
    TableInfo::of::<ScriptInclude>("script_include"),
    TableInfo::of::<ScriptedRestApi>("scripted_rest_api"),
    TableInfo::of::<ScriptedRestResource>("scripted_rest_resource"),
    TableInfo::of::<SystemProperty>("system_property"),
    TableInfo::of::<SystemPropertyCategory>("system_property_category"),
    TableInfo::of::<SystemPropertyRelation>("system_property_relation"),
    TableInfo::of::<UiMacro>("ui_macro"),
    TableInfo::of::<UiPage>("ui_page"),
    TableInfo::of::<UiScript>("ui_script"),
    TableInfo::of::<Widget>("widget"),
    TableInfo::of::<WidgetDependency>("widget_dependency"),
    TableInfo::of::<WidgetDependencyRelation>("widget_dependency_relation"),
];

pub fn all() -> &'static [TableInfo] {
    TABLES
}

/// Resolves a short name (`widget`) or an endpoint (`sp_widget.do`).
pub fn lookup(name_or_endpoint: &str) -> Option<&'static TableInfo> {
    TABLES
        .iter()
        .find(|info| info.name == name_or_endpoint)
        .or_else(|| TABLES.iter().find(|info| info.endpoint == name_or_endpoint))
}

fn validate_as<T: Table>(fields: &Value) -> Result<(), Error> {
    if !fields.is_object() {
        return Err(Error::new(ErrorKind::Usage).with_message("record json must be an object"));
    }
    envelope::decode_record::<T>(Fragment::new(fields.clone())).map(|_| ())
}
