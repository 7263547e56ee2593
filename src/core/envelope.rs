//! Purpose: Encode outgoing records and decode the shared response envelope.
//! Exports: `encode`, `decode_envelope`, `decode_record`, `check_status`, `Envelope`, `Fragment`.
//! Role: Pure transforms between typed records and the JSON wire body.
//! Invariants: An envelope is an object holding fragments under `records`.
//! Invariants: Single-record operations never pick among several fragments.

use super::error::{Error, ErrorKind};
use super::record::{Record, STATUS_SUCCESS};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

type CodecResult<T> = Result<T, Error>;

/// One undecoded record payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment(Value);

impl Fragment {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Envelope {
    fragments: Vec<Fragment>,
}

const RECORDS_KEY: &str = "records";

impl Envelope {
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Takes the only fragment; zero is `NotFound`, more than one is `AmbiguousResult`.
    pub fn into_single(self) -> CodecResult<Fragment> {
        let count = self.fragments.len();
        let mut fragments = self.fragments.into_iter();
        match (fragments.next(), count) {
            (None, _) => Err(Error::new(ErrorKind::NotFound).with_message("no records found")),
            (Some(fragment), 1) => Ok(fragment),
            (Some(_), _) => Err(Error::new(ErrorKind::AmbiguousResult)
                .with_message(format!("expected exactly one record, received {count}"))),
        }
    }
}

pub fn encode<R>(record: &R) -> CodecResult<Vec<u8>>
where
    R: Serialize,
{
    serde_json::to_vec(record).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode record json")
            .with_source(err)
    })
}

pub fn decode_envelope(body: &[u8]) -> CodecResult<Envelope> {
    let malformed = || {
        Error::new(ErrorKind::MalformedEnvelope)
            .with_message("response body is not a record envelope")
            .with_body(String::from_utf8_lossy(body))
    };
    let value: Value = serde_json::from_slice(body).map_err(|err| malformed().with_source(err))?;
    let Value::Object(mut wrapper) = value else {
        return Err(malformed());
    };
    let records = wrapper
        .remove(RECORDS_KEY)
        .or_else(|| wrapper.remove("Records"));
    let fragments = match records {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(records)) => records.into_iter().map(Fragment).collect(),
        Some(_) => return Err(malformed().with_message("envelope records is not a list")),
    };
    Ok(Envelope { fragments })
}

pub fn decode_record<R>(fragment: Fragment) -> CodecResult<R>
where
    R: DeserializeOwned,
{
    if !fragment.0.is_object() {
        return Err(Error::new(ErrorKind::MalformedRecord)
            .with_message("record fragment is not a json object")
            .with_body(fragment.0.to_string()));
    }
    let raw = fragment.0.to_string();
    serde_json::from_value(fragment.0).map_err(|err| {
        Error::new(ErrorKind::MalformedRecord)
            .with_message(format!("record fragment does not match expected shape: {err}"))
            .with_body(raw)
            .with_source(err)
    })
}

/// Fails with `Remote` unless the record reports success.
pub fn check_status<R>(record: &R) -> CodecResult<()>
where
    R: Record + ?Sized,
{
    if record.status() == STATUS_SUCCESS {
        return Ok(());
    }
    let (reason, message) = match record.error_detail() {
        Some(detail) => (detail.reason.clone(), detail.message.clone()),
        None => (
            String::new(),
            format!("remote status {:?} without error detail", record.status()),
        ),
    };
    Err(Error::remote(reason, message))
}

/// Envelope decode, single-record check, typed decode, then status check.
pub fn decode_single<R>(body: &[u8]) -> CodecResult<R>
where
    R: Record + DeserializeOwned,
{
    let fragment = decode_envelope(body)?.into_single()?;
    let record: R = decode_record(fragment)?;
    check_status(&record)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::{decode_envelope, decode_record, decode_single, encode};
    use crate::core::error::ErrorKind;
    use crate::core::record::RecordBase;
    use serde_json::json;

    #[test]
    fn decode_envelope_keeps_fragment_order() {
        let envelope =
            decode_envelope(br#"{"records":[{"sys_id":"a"},{"sys_id":"b"}]}"#).expect("decode");
        assert_eq!(envelope.len(), 2);
        assert_eq!(envelope.fragments()[0].as_value()["sys_id"], "a");
        assert_eq!(envelope.fragments()[1].as_value()["sys_id"], "b");
    }

    #[test]
    fn missing_records_key_is_empty() {
        let envelope = decode_envelope(b"{}").expect("decode");
        assert!(envelope.is_empty());
        let err = envelope.into_single().expect_err("err");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn non_json_body_is_malformed_envelope() {
        for body in [
            &b"<html>login</html>"[..],
            &b"[]"[..],
            &br#"{"records": 3}"#[..],
        ] {
            let err = decode_envelope(body).expect_err("err");
            assert_eq!(err.kind(), ErrorKind::MalformedEnvelope);
        }
    }

    #[test]
    fn two_fragments_are_ambiguous() {
        let envelope = decode_envelope(br#"{"records":[{},{}]}"#).expect("decode");
        let err = envelope.into_single().expect_err("err");
        assert_eq!(err.kind(), ErrorKind::AmbiguousResult);
    }

    #[test]
    fn scalar_fragment_is_malformed_record() {
        let fragment = decode_envelope(br#"{"records":["x"]}"#)
            .expect("decode")
            .into_single()
            .expect("single");
        let err = decode_record::<RecordBase>(fragment).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::MalformedRecord);
    }

    #[test]
    fn failed_status_surfaces_reason_and_message_verbatim() {
        let body = json!({"records": [{
            "__status": "failure",
            "__error": {"reason": "Invalid insert", "message": "Duplicate name"}
        }]})
        .to_string();
        let err = decode_single::<RecordBase>(body.as_bytes()).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.reason(), Some("Invalid insert"));
        assert_eq!(err.message(), Some("Duplicate name"));
    }

    #[test]
    fn missing_status_is_not_success() {
        let err = decode_single::<RecordBase>(br#"{"records":[{"sys_id":"a"}]}"#).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Remote);
    }

    #[test]
    fn encode_omits_empty_protocol_fields() {
        let bytes = encode(&RecordBase::with_id("abc")).expect("encode");
        assert_eq!(bytes, br#"{"sys_id":"abc"}"#);
    }
}
