//! Access control tables.

use crate::core::record::RecordBase;
use crate::core::wire::{bool_string, int_string};
use crate::impl_record;
use serde::{Deserialize, Serialize};

/// An access control rule.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acl {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(rename = "type")]
    pub kind: String,
    pub operation: String,
    #[serde(with = "bool_string")]
    pub admin_overrides: bool,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(with = "bool_string")]
    pub active: bool,
    #[serde(with = "bool_string")]
    pub advanced: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub condition: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub script: String,
}

impl_record!(Acl, "sys_security_acl.do");

/// A user role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub description: String,
    #[serde(with = "bool_string")]
    pub elevated_privilege: bool,
    pub suffix: String,
    pub assignable_by: String,
}

impl_record!(Role, "sys_user_role.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OauthEntity {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    pub client_uuid: String,
    pub client_id: String,
    #[serde(with = "int_string")]
    pub access_token_lifespan: i64,
    #[serde(with = "int_string")]
    pub refresh_token_lifespan: i64,
    pub redirect_url: String,
    pub logo_url: String,
    pub access: String,
}

impl_record!(OauthEntity, "oauth_entity.do");

/// A table definition (`sys_db_object`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbTable {
    #[serde(flatten)]
    pub base: RecordBase,
    pub label: String,
    pub user_role: String,
    pub access: String,
    #[serde(with = "bool_string")]
    pub read_access: bool,
    #[serde(with = "bool_string")]
    pub create_access: bool,
    #[serde(with = "bool_string")]
    pub alter_access: bool,
    #[serde(with = "bool_string")]
    pub delete_access: bool,
    #[serde(rename = "ws_access", with = "bool_string")]
    pub web_service_access: bool,
    #[serde(with = "bool_string")]
    pub configuration_access: bool,
    #[serde(rename = "is_extendable", with = "bool_string")]
    pub extendable: bool,
    #[serde(rename = "live_feed_enabled", with = "bool_string")]
    pub live_feed: bool,
    #[serde(with = "bool_string")]
    pub create_access_controls: bool,
    #[serde(with = "bool_string")]
    pub create_module: bool,
    #[serde(with = "bool_string")]
    pub create_mobile_module: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl_record!(DbTable, "sys_db_object.do");
