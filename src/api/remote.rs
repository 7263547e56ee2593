//! Purpose: Provide the blocking HTTP client for table endpoints (JSONv2 protocol).
//! Exports: `TableClient`.
//! Role: The only component that talks to the remote store; stateless between calls.
//! Invariants: Every request carries the precomputed Basic authorization header.
//! Invariants: Non-2xx responses become transport errors before any envelope decode.
//! Invariants: Fetch and create accept exactly one successful record, nothing else.
#![allow(clippy::result_large_err)]

use super::client::{ApiResult, TableApi};
use super::config::ClientConfig;
use crate::core::envelope::{self, Fragment};
use crate::core::error::{Error, ErrorKind};
use crate::core::query::{Action, QueryString, table_url};
use crate::core::record::{Record, RecordBase, STATUS_SUCCESS};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

const ID_FIELD: &str = "sys_id";
const NAME_FIELD: &str = "name";

/// Cheap to clone; clones share one agent and one set of credentials.
#[derive(Clone)]
pub struct TableClient {
    inner: Arc<TableClientInner>,
}

struct TableClientInner {
    base_url: Url,
    authorization: String,
    agent: ureq::Agent,
}

impl TableClient {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let base_url = normalize_base_url(&config.instance_url)?;
        if config.username.is_empty() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("username must not be empty")
                .with_hint("Set --username or SNOW_USERNAME."));
        }
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            inner: Arc::new(TableClientInner {
                base_url,
                authorization: config.authorization(),
                agent: builder.build(),
            }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn fetch_by_id<R>(&self, endpoint: &str, id: &str) -> ApiResult<R>
    where
        R: Record + DeserializeOwned,
    {
        ensure_present(id, "fetch requires a record id", endpoint)?;
        let query = QueryString::new().filter_eq(ID_FIELD, id);
        let body = self.send("GET", endpoint, &query, None)?;
        decode_one(endpoint, &body)
    }

    pub fn fetch_by_name<R>(&self, endpoint: &str, name: &str) -> ApiResult<R>
    where
        R: Record + DeserializeOwned,
    {
        ensure_present(name, "fetch by name requires a name", endpoint)?;
        let query = QueryString::new().filter_eq(NAME_FIELD, name);
        let body = self.send("GET", endpoint, &query, None)?;
        decode_one(endpoint, &body)
    }

    /// Inserts `record` and returns the stored record as the remote store sees it.
    pub fn create<R>(&self, endpoint: &str, record: &R) -> ApiResult<R>
    where
        R: Record + Serialize + DeserializeOwned,
    {
        let mut query = QueryString::new().action(Action::Insert);
        if !record.scope().is_empty() {
            query = query.param("sysparm_record_scope", record.scope());
        }
        let payload = envelope::encode(record)?;
        let body = self.send("POST", endpoint, &query, Some(&payload))?;
        decode_one(endpoint, &body)
    }

    pub fn update<R>(&self, endpoint: &str, record: &R) -> ApiResult<()>
    where
        R: Record + Serialize,
    {
        ensure_present(record.id(), "update requires a record id", endpoint)?;
        let query = QueryString::new()
            .action(Action::Update)
            .filter_eq(ID_FIELD, record.id());
        let payload = envelope::encode(record)?;
        let body = self.send("POST", endpoint, &query, Some(&payload))?;
        match update_rejection(&body) {
            Some(err) => Err(err.with_endpoint(endpoint)),
            None => Ok(()),
        }
    }

    pub fn delete(&self, endpoint: &str, id: &str) -> ApiResult<()> {
        ensure_present(id, "delete requires a record id", endpoint)?;
        let query = QueryString::new()
            .action(Action::DeleteRecord)
            .param("sysparm_sys_id", id);
        self.send("POST", endpoint, &query, Some(&[]))?;
        Ok(())
    }

    fn send(
        &self,
        method: &str,
        endpoint: &str,
        query: &QueryString,
        payload: Option<&[u8]>,
    ) -> ApiResult<Vec<u8>> {
        let url = table_url(&self.inner.base_url, endpoint, query)?;
        debug!(method, endpoint, query = query.as_str(), "table request");
        let request = self
            .inner
            .agent
            .request(method, url.as_str())
            .set("Authorization", &self.inner.authorization)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json");
        let response = match payload {
            Some(payload) => request.send_bytes(payload),
            None => request.call(),
        };

        match response {
            Ok(resp) => {
                let status = resp.status();
                let body = read_body(resp)?;
                debug!(endpoint, status, bytes = body.len(), "table response");
                if !(200..300).contains(&status) {
                    return Err(transport_failure(endpoint, status, &body));
                }
                Ok(body)
            }
            Err(ureq::Error::Status(status, resp)) => match read_body(resp) {
                Ok(body) => Err(transport_failure(endpoint, status, &body)),
                Err(read_err) => {
                    warn!(endpoint, status, error = %read_err, "error response body unreadable");
                    Err(transport_failure(endpoint, status, &[]).with_source(read_err))
                }
            },
            Err(ureq::Error::Transport(err)) => {
                warn!(endpoint, error = %err, "table request failed");
                Err(Error::new(ErrorKind::Transport)
                    .with_message("request failed")
                    .with_endpoint(endpoint)
                    .with_source(err))
            }
        }
    }
}

impl TableApi for TableClient {
    fn fetch_by_id<R>(&self, endpoint: &str, id: &str) -> ApiResult<R>
    where
        R: Record + DeserializeOwned,
    {
        TableClient::fetch_by_id(self, endpoint, id)
    }

    fn fetch_by_name<R>(&self, endpoint: &str, name: &str) -> ApiResult<R>
    where
        R: Record + DeserializeOwned,
    {
        TableClient::fetch_by_name(self, endpoint, name)
    }

    fn create<R>(&self, endpoint: &str, record: &R) -> ApiResult<R>
    where
        R: Record + Serialize + DeserializeOwned,
    {
        TableClient::create(self, endpoint, record)
    }

    fn update<R>(&self, endpoint: &str, record: &R) -> ApiResult<()>
    where
        R: Record + Serialize,
    {
        TableClient::update(self, endpoint, record)
    }

    fn delete(&self, endpoint: &str, id: &str) -> ApiResult<()> {
        TableClient::delete(self, endpoint, id)
    }
}

fn normalize_base_url(raw: &str) -> ApiResult<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid instance url")
            .with_hint("Use the instance root, e.g. https://dev12345.service-now.com/")
            .with_source(err)
    })?;
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(
            Error::new(ErrorKind::Usage).with_message("instance url must use http or https scheme")
        );
    }
    if url.cannot_be_a_base() {
        return Err(Error::new(ErrorKind::Usage).with_message("instance url cannot be a base"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn decode_one<R>(endpoint: &str, body: &[u8]) -> ApiResult<R>
where
    R: Record + DeserializeOwned,
{
    envelope::decode_single(body).map_err(|err| {
        if err.kind() == ErrorKind::Remote {
            warn!(
                endpoint,
                reason = err.reason().unwrap_or_default(),
                "record rejected by instance"
            );
        }
        err.with_endpoint(endpoint)
    })
}

fn ensure_present(value: &str, message: &str, endpoint: &str) -> ApiResult<()> {
    if value.is_empty() {
        return Err(Error::new(ErrorKind::PreconditionFailed)
            .with_message(message)
            .with_endpoint(endpoint));
    }
    Ok(())
}

fn read_body(response: ureq::Response) -> ApiResult<Vec<u8>> {
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|err| {
            Error::new(ErrorKind::Transport)
                .with_message("failed to read response body")
                .with_source(err)
        })?;
    Ok(body)
}

fn transport_failure(endpoint: &str, status: u16, body: &[u8]) -> Error {
    warn!(endpoint, status, "table request rejected");
    Error::transport(status, String::from_utf8_lossy(body)).with_endpoint(endpoint)
}

/// Update bodies are not required to hold a record; only an explicit
/// non-success status in a lone fragment counts as a rejection.
fn update_rejection(body: &[u8]) -> Option<Error> {
    let fragment: Fragment = envelope::decode_envelope(body).ok()?.into_single().ok()?;
    let base: RecordBase = envelope::decode_record(fragment).ok()?;
    if base.status.is_empty() || base.status == STATUS_SUCCESS {
        return None;
    }
    envelope::check_status(&base).err()
}

#[cfg(test)]
mod tests {
    use super::{TableClient, normalize_base_url, update_rejection};
    use crate::api::ClientConfig;
    use crate::core::error::ErrorKind;
    use crate::core::record::RecordBase;
    use std::error::Error as StdError;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;

    #[test]
    fn normalize_base_url_adds_trailing_slash() {
        let url = normalize_base_url("https://dev.example.com").expect("url");
        assert_eq!(url.as_str(), "https://dev.example.com/");
        let url = normalize_base_url("https://dev.example.com/proxy?x=1#top").expect("url");
        assert_eq!(url.as_str(), "https://dev.example.com/proxy/");
    }

    #[test]
    fn normalize_base_url_rejects_other_schemes() {
        let err = normalize_base_url("ftp://dev.example.com").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
        let err = normalize_base_url("not a url").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn client_requires_username() {
        let config = ClientConfig::new("https://dev.example.com", "", "pw");
        let err = TableClient::new(&config).err().expect("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    // Port 9 (discard) on loopback is never a table store; a request would fail
    // with a transport error, so a precondition error proves nothing was sent.
    fn unreachable_client() -> TableClient {
        let config = ClientConfig::new("http://127.0.0.1:9", "admin", "pw")
            .with_timeout(Duration::from_millis(200));
        TableClient::new(&config).expect("client")
    }

    #[test]
    fn update_without_id_fails_before_sending() {
        let err = unreachable_client()
            .update("sp_widget.do", &RecordBase::default())
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
        assert_eq!(err.endpoint(), Some("sp_widget.do"));
    }

    #[test]
    fn delete_and_fetch_without_id_fail_before_sending() {
        let client = unreachable_client();
        let err = client.delete("sp_widget.do", "").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
        let err = client
            .fetch_by_id::<RecordBase>("sp_widget.do", "")
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
    }

    #[test]
    fn truncated_error_body_keeps_status_and_read_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut request: Vec<u8> = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&chunk[..n]),
                }
            }
            // Declares 64 body bytes, sends 7, then closes.
            let _ = stream.write_all(
                b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 64\r\n\r\npartial",
            );
        });

        let config = ClientConfig::new(format!("http://{addr}"), "admin", "pw")
            .with_timeout(Duration::from_secs(5));
        let client = TableClient::new(&config).expect("client");
        let err = client.delete("sp_widget.do", "abc123").expect_err("err");
        server.join().expect("server");

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body(), Some(""));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn update_rejection_only_for_explicit_failure() {
        assert!(update_rejection(b"").is_none());
        assert!(update_rejection(br#"{"records":[]}"#).is_none());
        assert!(update_rejection(br#"{"records":[{"sys_id":"a"}]}"#).is_none());
        assert!(update_rejection(br#"{"records":[{"__status":"success"}]}"#).is_none());
        let err = update_rejection(
            br#"{"records":[{"__status":"failure","__error":{"reason":"ACL","message":"no"}}]}"#,
        )
        .expect("rejection");
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.reason(), Some("ACL"));
    }
}
