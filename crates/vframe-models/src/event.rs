//! Object-created event envelope.
//!
//! Only the fields the handler reads are modelled; everything else in the
//! envelope (`source`, `time`, `resources`, ...) is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::OBJECT_CREATED;

/// Errors raised while reading an object-created event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event is missing {0}")]
    MissingField(&'static str),

    #[error("Event envelope is invalid: {0}")]
    Invalid(String),
}

/// Storage-change event as delivered by the event bus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "detail-type", default)]
    pub detail_type: Option<String>,
    #[serde(default)]
    pub detail: Option<EventDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetail {
    #[serde(default)]
    pub bucket: Option<EventBucket>,
    #[serde(default)]
    pub object: Option<EventObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBucket {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventObject {
    #[serde(default)]
    pub key: Option<String>,
}

/// Bucket/key pair named by an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl StorageEvent {
    /// Declared `detail-type` of a raw envelope, if it is a string.
    pub fn detail_type_of(payload: &Value) -> Option<&str> {
        payload.get("detail-type").and_then(Value::as_str)
    }

    /// Whether a raw envelope announces a new object.
    ///
    /// Reads the raw JSON: envelopes of any other shape count as unsupported,
    /// not malformed.
    pub fn is_object_created(payload: &Value) -> bool {
        Self::detail_type_of(payload) == Some(OBJECT_CREATED)
    }

    /// Decode an envelope.
    pub fn from_value(payload: Value) -> Result<Self, EventError> {
        serde_json::from_value(payload).map_err(|e| EventError::Invalid(e.to_string()))
    }

    /// Bucket and key of the object the event refers to.
    pub fn object_ref(&self) -> Result<ObjectRef, EventError> {
        let detail = self
            .detail
            .as_ref()
            .ok_or(EventError::MissingField("detail"))?;

        let bucket = detail
            .bucket
            .as_ref()
            .and_then(|b| b.name.clone())
            .filter(|name| !name.is_empty())
            .ok_or(EventError::MissingField("detail.bucket.name"))?;

        let key = detail
            .object
            .as_ref()
            .and_then(|o| o.key.clone())
            .filter(|key| !key.is_empty())
            .ok_or(EventError::MissingField("detail.object.key"))?;

        Ok(ObjectRef { bucket, key })
    }
}
