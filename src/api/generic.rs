//! Purpose: A schemaless record for tables without a typed definition.
//! Exports: `GenericRecord`.
//! Invariants: Protocol fields always land in `base`, never in `fields`.

use crate::core::record::RecordBase;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

crate::impl_record!(GenericRecord);

impl GenericRecord {
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}
