//! Purpose: Define the stable public Rust API boundary for table access.
//! Exports: Client, configuration, record contract, and error types.
//! Role: Public, additive-only surface; hides the wire helpers in `core`.
//! Invariants: Adapters depend on this module only, never on `core` internals.

mod client;
mod config;
mod generic;
mod remote;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::record::{ErrorDetail, Record, RecordBase, STATUS_SUCCESS, Table};
pub use client::{ApiResult, TableApi, fetch_optional};
pub use config::ClientConfig;
pub use generic::GenericRecord;
pub use remote::TableClient;
