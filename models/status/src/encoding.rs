use std::convert::TryFrom;

use serde::ser::SerializeSeq;
use serde::Serialize;
use serde::Serializer;
use serde_derive::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::Severity;
use super::Status;
use super::StatusList;

/// Wire form of a `StatusList`.
///
/// Healthy results are compressed to a bare token (`["OK"]`) while any other
/// result is sent as a tagged pair (`["CRIT", {...}]`).
#[derive(Clone, Eq, PartialEq, Hash, Debug, Deserialize)]
#[serde(try_from = "RawEncodedStatus")]
pub enum EncodedStatus {
    Ok,
    Detailed(Status),
}

impl EncodedStatus {
    /// Severity the encoded status reports.
    pub fn severity(&self) -> Severity {
        match self {
            EncodedStatus::Ok => Severity::Ok,
            EncodedStatus::Detailed(status) => status.result,
        }
    }

    /// Expand the encoded form back into a `Status`.
    ///
    /// The bare `OK` form carries no description so `description` is used instead.
    pub fn into_status<S: Into<String>>(self, description: S) -> Status {
        match self {
            EncodedStatus::Ok => Status::ok(description),
            EncodedStatus::Detailed(status) => status,
        }
    }
}

impl Serialize for EncodedStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            EncodedStatus::Ok => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(&Severity::Ok)?;
                seq.end()
            }
            EncodedStatus::Detailed(status) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&status.result)?;
                seq.serialize_element(status)?;
                seq.end()
            }
        }
    }
}

/// Shapes accepted when decoding an `EncodedStatus`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEncodedStatus {
    Detailed(Severity, Status),
    Bare((Severity,)),
}

/// Returned when a decoded status does not follow the encoding rules.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum EncodingMismatch {
    #[error("severity {0} requires status details")]
    MissingDetails(Severity),

    #[error("tag {tag} does not match status result {result}")]
    TagMismatch { tag: Severity, result: Severity },
}

impl TryFrom<RawEncodedStatus> for EncodedStatus {
    type Error = EncodingMismatch;
    fn try_from(raw: RawEncodedStatus) -> Result<Self, Self::Error> {
        match raw {
            RawEncodedStatus::Bare((Severity::Ok,)) => Ok(EncodedStatus::Ok),
            RawEncodedStatus::Bare((severity,)) => Err(EncodingMismatch::MissingDetails(severity)),
            RawEncodedStatus::Detailed(tag, status) if tag != status.result => {
                Err(EncodingMismatch::TagMismatch {
                    tag,
                    result: status.result,
                })
            }
            RawEncodedStatus::Detailed(_, status) => Ok(EncodedStatus::Detailed(status)),
        }
    }
}

/// Encode a `StatusList` for the wire looking only at its first status.
pub fn translate_status_list(list: &StatusList) -> EncodedStatus {
    let status = match list.first() {
        None => {
            return EncodedStatus::Detailed(Status::critical(
                "Invalid status response",
                "StatusList empty",
            ))
        }
        Some(status) => status,
    };
    match status.result {
        Severity::Ok => EncodedStatus::Ok,
        _ => EncodedStatus::Detailed(status.clone()),
    }
}

/// Encode a `StatusList` and render it as JSON.
pub fn serialize_status_list(list: &StatusList) -> String {
    let encoded = translate_status_list(list);
    match serde_json::to_string(&encoded) {
        Ok(text) => text,
        Err(error) => json!([
            "CRIT",
            {
                "description": "Invalid StatusList",
                "result": "CRIT",
                "details": format!("Error serializing StatusList: {}", error),
            }
        ])
        .to_string(),
    }
}
