//! Outbound REST messages and scripted inbound REST APIs.

use crate::core::record::RecordBase;
use crate::core::wire::bool_string;
use crate::impl_record;
use serde::{Deserialize, Serialize};

/// An outbound REST message definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestMessage {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    pub description: String,
    pub rest_endpoint: String,
    pub access: String,
    pub authentication_type: String,
}

impl_record!(RestMessage, "sys_rest_message.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestMessageHeader {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    pub value: String,
    #[serde(rename = "rest_message")]
    pub message_id: String,
}

impl_record!(RestMessageHeader, "sys_rest_message_headers.do");

/// An HTTP method of an outbound REST message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestMethod {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(rename = "function_name")]
    pub name: String,
    #[serde(rename = "rest_message")]
    pub message_id: String,
    pub http_method: String,
    pub rest_endpoint: String,
    pub authentication_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub qualified_name: String,
}

impl_record!(RestMethod, "sys_rest_message_fn.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestMethodHeader {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    pub value: String,
    #[serde(rename = "rest_message_function")]
    pub method_id: String,
}

impl_record!(RestMethodHeader, "sys_rest_message_fn_headers.do");

/// A scripted REST API definition (`sys_ws_definition`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptedRestApi {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(with = "bool_string")]
    pub active: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub consumes: String,
    #[serde(with = "bool_string")]
    pub consumes_customized: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub enforce_acl: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub produces: String,
    #[serde(with = "bool_string")]
    pub produces_customized: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub base_uri: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc_link: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_description: String,
}

impl_record!(ScriptedRestApi, "sys_ws_definition.do");

/// One resource (operation) of a scripted REST API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptedRestResource {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    #[serde(with = "bool_string")]
    pub active: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub enforce_acl: String,
    #[serde(with = "bool_string")]
    pub requires_acl_authorization: bool,
    #[serde(with = "bool_string")]
    pub requires_authentication: bool,
    #[serde(with = "bool_string")]
    pub requires_snc_internal_role: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub produces: String,
    #[serde(with = "bool_string")]
    pub produces_customized: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_description: String,
    pub operation_script: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub relative_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub request_example: String,
    pub http_method: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub consumes: String,
    #[serde(with = "bool_string")]
    pub consumes_customized: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub operation_uri: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub web_service_definition: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub web_service_version: String,
}

impl_record!(ScriptedRestResource, "sys_ws_operation.do");
