// Core modules implementing the record contract, wire codecs, and error modeling.
pub mod envelope;
pub mod error;
pub mod query;
pub mod record;
pub mod wire;
