//! Typed decoding of upstream payloads.
//!
//! Keys that name a typed model field ([`TYPED_FIELDS`]) are matched
//! case-insensitively by folding them to lowercase before deserialization.
//! Folding descends only into the values of typed fields, so everything that
//! lands in a model's `extra` map keeps its original spelling.
//!
//! An exact lowercase key always claims its field. Otherwise the first
//! differently-cased spelling in key order does, and any other spelling is
//! left as-is and passes through.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::TYPED_FIELDS;
use crate::upstream::builder::QueryParams;
use crate::upstream::error::{DecodeError, GatewayError};
use crate::upstream::forwarder::Upstream;
use crate::upstream::transport::RawPayload;

/// Decode a raw payload into `T`.
pub fn decode<T: DeserializeOwned>(payload: &RawPayload) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_slice(payload.as_bytes()).map_err(DecodeError::Syntax)?;
    serde_json::from_value(fold_typed_keys(value)).map_err(|source| DecodeError::Shape {
        target: std::any::type_name::<T>(),
        source,
    })
}

/// Forward a call and decode its payload.
pub async fn fetch<T: DeserializeOwned>(
    upstream: &dyn Upstream,
    endpoint: &str,
    params: &QueryParams,
) -> Result<T, GatewayError> {
    let payload = upstream.get(endpoint, params).await?;
    Ok(decode(&payload)?)
}

fn is_typed(key: &str) -> bool {
    TYPED_FIELDS.contains(&key)
}

fn fold_typed_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let (exact, other): (Vec<_>, Vec<_>) = map.into_iter().partition(|(k, _)| is_typed(k));

            let mut folded: Map<String, Value> = exact
                .into_iter()
                .map(|(k, v)| (k, fold_typed_keys(v)))
                .collect();
            let mut untouched = Vec::new();

            for (key, v) in other {
                let lower = key.to_lowercase();
                if is_typed(&lower) && !folded.contains_key(&lower) {
                    folded.insert(lower, fold_typed_keys(v));
                } else {
                    untouched.push((key, v));
                }
            }

            folded.extend(untouched);
            Value::Object(folded)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(fold_typed_keys).collect()),
        other => other,
    }
}
