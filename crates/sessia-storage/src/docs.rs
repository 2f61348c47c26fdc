//! Typed JSON document helpers.
//!
//! Every entity collection is a set of JSON objects under a key prefix (see
//! `sessia_core::keys`). These helpers wrap the raw object operations with
//! serde, so route handlers and aggregators work in domain types.

use aws_sdk_s3::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects;

/// Load and deserialize one JSON document.
pub async fn load_doc<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<T, StorageError> {
    let output = objects::get_object(client, bucket, key).await?;
    let value: T = serde_json::from_slice(&output.body)?;
    Ok(value)
}

/// Serialize and store one JSON document.
pub async fn save_doc<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec(value)?;
    objects::put_object(client, bucket, key, body, Some("application/json")).await
}

/// Load every JSON document under a prefix.
///
/// Reads are sequential; collections here are bounded per client, so one
/// prefix listing plus a handful of GETs is the expected shape.
pub async fn list_docs<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = objects::list_keys(client, bucket, prefix).await?;

    let mut docs = Vec::with_capacity(keys.len());
    for key in &keys {
        let output = objects::get_object(client, bucket, key).await?;
        let doc: T = serde_json::from_slice(&output.body)?;
        docs.push(doc);
    }

    Ok(docs)
}
