//! Application scaffolding tables: apps, categories, menus and modules.

use crate::core::record::RecordBase;
use crate::core::wire::{bool_string, int_string};
use crate::impl_record;
use serde::{Deserialize, Serialize};

/// A scoped application (`sys_app`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    pub scope: String,
    pub version: String,
}

impl_record!(Application, "sys_app.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationCategory {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    #[serde(rename = "default_order")]
    pub order: String,
    pub style: String,
}

impl_record!(ApplicationCategory, "sys_app_category.do");

/// A navigator menu grouping application modules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationMenu {
    #[serde(flatten)]
    pub base: RecordBase,
    pub title: String,
    pub description: String,
    pub hint: String,
    pub device_type: String,
    #[serde(with = "int_string")]
    pub order: i64,
    pub roles: String,
    #[serde(rename = "category")]
    pub category_id: String,
    #[serde(with = "bool_string")]
    pub active: bool,
}

impl_record!(ApplicationMenu, "sys_app_application.do");

/// One navigator entry inside an application menu.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationModule {
    #[serde(flatten)]
    pub base: RecordBase,
    pub title: String,
    #[serde(rename = "application")]
    pub menu_id: String,
    pub hint: String,
    #[serde(with = "int_string")]
    pub order: i64,
    pub roles: String,
    #[serde(with = "bool_string")]
    pub active: bool,
    #[serde(with = "bool_string")]
    pub override_menu_roles: bool,
    pub link_type: String,
    #[serde(rename = "query")]
    pub arguments: String,
    pub window_name: String,
    #[serde(rename = "name")]
    pub table_name: String,
}

impl_record!(ApplicationModule, "sys_app_module.do");
