//! Purpose: Define the record contract every table payload satisfies.
//! Exports: `Record`, `Table`, `RecordBase`, `ErrorDetail`, `STATUS_SUCCESS`.
//! Role: Lets the client validate and route records without knowing business fields.
//! Invariants: Protocol fields live in `RecordBase`, composed by flattening.
//! Invariants: `error_detail` is present exactly when `status` is not success.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Value of `__status` for a record the remote store accepted.
pub const STATUS_SUCCESS: &str = "success";

/// Business-level failure detail embedded in a record as `__error`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorDetail {
    pub reason: String,
    pub message: String,
}

pub trait Record {
    fn id(&self) -> &str;
    fn scope(&self) -> &str;
    fn status(&self) -> &str;
    fn error_detail(&self) -> Option<&ErrorDetail>;
}

/// A record bound to one remote table.
pub trait Table: Record + Serialize + DeserializeOwned + Default {
    const ENDPOINT: &'static str;
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordBase {
    #[serde(rename = "sys_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "sys_policy", skip_serializing_if = "String::is_empty")]
    pub protection_policy: String,
    #[serde(rename = "sys_scope", skip_serializing_if = "String::is_empty")]
    pub scope: String,
    #[serde(rename = "__status", skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(rename = "__error", skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl RecordBase {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }
}

impl Record for RecordBase {
    fn id(&self) -> &str {
        &self.id
    }

    fn scope(&self) -> &str {
        &self.scope
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn error_detail(&self) -> Option<&ErrorDetail> {
        self.error.as_ref()
    }
}

/// Implements `Record` (and `Table` when an endpoint is given) for a struct
/// holding its protocol fields in a `base: RecordBase` field.
#[macro_export]
macro_rules! impl_record {
    ($ty:ty) => {
        impl $crate::core::record::Record for $ty {
            fn id(&self) -> &str {
                &self.base.id
            }

            fn scope(&self) -> &str {
                &self.base.scope
            }

            fn status(&self) -> &str {
                &self.base.status
            }

            fn error_detail(&self) -> Option<&$crate::core::record::ErrorDetail> {
                self.base.error.as_ref()
            }
        }
    };
    ($ty:ty, $endpoint:expr) => {
        $crate::impl_record!($ty);

        impl $crate::core::record::Table for $ty {
            const ENDPOINT: &'static str = $endpoint;
        }
    };
}
