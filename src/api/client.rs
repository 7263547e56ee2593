//! Purpose: Define the operation seam that resource adapters program against.
//! Exports: `TableApi`, `fetch_optional`.
//! Role: Lets adapters run against `TableClient` or a test double interchangeably.
//! Invariants: Typed helpers only add the table's endpoint constant; no extra behavior.
#![allow(clippy::result_large_err)]

use crate::core::error::Error;
use crate::core::record::{Record, Table};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub type ApiResult<T> = Result<T, Error>;

pub trait TableApi {
    fn fetch_by_id<R>(&self, endpoint: &str, id: &str) -> ApiResult<R>
    where
        R: Record + DeserializeOwned;

    fn fetch_by_name<R>(&self, endpoint: &str, name: &str) -> ApiResult<R>
    where
        R: Record + DeserializeOwned;

    fn create<R>(&self, endpoint: &str, record: &R) -> ApiResult<R>
    where
        R: Record + Serialize + DeserializeOwned;

    fn update<R>(&self, endpoint: &str, record: &R) -> ApiResult<()>
    where
        R: Record + Serialize;

    fn delete(&self, endpoint: &str, id: &str) -> ApiResult<()>;

    fn get<T: Table>(&self, id: &str) -> ApiResult<T> {
        self.fetch_by_id(T::ENDPOINT, id)
    }

    fn get_by_name<T: Table>(&self, name: &str) -> ApiResult<T> {
        self.fetch_by_name(T::ENDPOINT, name)
    }

    fn insert<T: Table>(&self, record: &T) -> ApiResult<T> {
        self.create(T::ENDPOINT, record)
    }

    fn save<T: Table>(&self, record: &T) -> ApiResult<()> {
        self.update(T::ENDPOINT, record)
    }

    fn remove<T: Table>(&self, id: &str) -> ApiResult<()> {
        self.delete(T::ENDPOINT, id)
    }
}

/// Reads a record, mapping "entity absent" errors to `None`.
///
/// Every other error kind propagates unchanged.
pub fn fetch_optional<A, R>(api: &A, endpoint: &str, id: &str) -> ApiResult<Option<R>>
where
    A: TableApi + ?Sized,
    R: Record + DeserializeOwned,
{
    match api.fetch_by_id(endpoint, id) {
        Ok(record) => Ok(Some(record)),
        Err(err) if err.is_absent() => Ok(None),
        Err(err) => Err(err),
    }
}
