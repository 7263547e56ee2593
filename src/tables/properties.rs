use crate::core::record::RecordBase;
use crate::core::wire::bool_string;
use crate::impl_record;
use serde::{Deserialize, Serialize};

/// A system property.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemProperty {
    #[serde(flatten)]
    pub base: RecordBase,
    pub suffix: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub choices: String,
    #[serde(with = "bool_string")]
    pub is_private: bool,
    #[serde(with = "bool_string")]
    pub ignore_cache: bool,
    pub description: String,
    pub write_roles: String,
    pub read_roles: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

impl_record!(SystemProperty, "sys_properties.do");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemPropertyCategory {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: String,
    #[serde(rename = "title")]
    pub title_html: String,
}

impl_record!(SystemPropertyCategory, "sys_properties_category.do");

/// Links a system property to a category.
///
/// Stored in the category m2m table. `sys_properties.do` holds the properties
/// themselves, so a relation sent there would be created as a property.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemPropertyRelation {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(rename = "category")]
    pub category_id: String,
    #[serde(rename = "property")]
    pub property_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub order: String,
}

impl_record!(SystemPropertyRelation, "sys_properties_category_m2m.do");
