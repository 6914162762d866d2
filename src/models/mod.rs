//! Response models for the upstream game-data API.
//!
//! Each model types only the fields the gateway relies on and keeps every
//! other upstream field in a flattened `extra` map, so re-encoding a decoded
//! value reproduces the upstream document key for key, explicit `null`s
//! included.

mod game;
mod status;

pub use game::{
    field_value, Field, Game, NamedEntity, Paginated, PlatformInfo, Screenshot, StoreInfo,
    TYPED_FIELDS,
};
pub use status::{ApiStatus, HealthStatus};

/// Platform listing entry.
pub type Platform = NamedEntity;
/// Genre listing entry.
pub type Genre = NamedEntity;
