//! Purpose: Library crate backing the `snowtable` CLI and table adapters.
//! Exports: `api` (client + record contract), `core` (wire codecs), `tables` (typed records).
//! Role: Generic CRUD over table endpoints that share one JSON envelope convention.
//! Invariants: The client is stateless between calls apart from its immutable config.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
pub mod tables;
