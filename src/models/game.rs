use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An upstream field that may be absent, `null`, or set.
///
/// The outer `Option` records presence and the inner one nullness, so a
/// decoded value re-encodes with the same keys the upstream sent.
pub type Field<T> = Option<Option<T>>;

fn present<'de, D, T>(deserializer: D) -> Result<Field<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Every key some model reads into a typed field. Decoding matches these
/// case-insensitively; all other keys pass through untouched.
pub const TYPED_FIELDS: &[&str] = &[
    "count",
    "next",
    "previous",
    "results",
    "id",
    "slug",
    "name",
    "released",
    "rating",
    "metacritic",
    "genres",
    "platforms",
    "stores",
    "games_count",
    "image_background",
    "platform",
    "released_at",
    "store",
    "url",
    "image",
];

/// The value of a field that is present and non-null.
pub fn field_value<T>(field: &Field<T>) -> Option<&T> {
    field.as_ref().and_then(Option::as_ref)
}

/// One page of a collection endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub previous: Option<String>,

    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A game, as listed or as returned by the detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Game {
    pub id: u64,
    pub slug: String,
    pub name: String,

    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub released: Field<String>,

    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub rating: Field<f64>,

    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub metacritic: Field<u32>,

    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub genres: Field<Vec<NamedEntity>>,

    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub platforms: Field<Vec<PlatformInfo>>,

    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub stores: Field<Vec<StoreInfo>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Platform, genre, store, tag, developer or publisher.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NamedEntity {
    pub id: u64,
    pub name: String,
    pub slug: String,

    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub games_count: Field<u64>,

    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub image_background: Field<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A game's availability on one platform.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformInfo {
    pub platform: NamedEntity,

    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub released_at: Field<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A game's listing in one store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreInfo {
    pub id: u64,

    // Absent on the per-game store listing, which carries `store_id` instead.
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub store: Field<NamedEntity>,

    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub url: Field<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Screenshot {
    pub id: i64,
    pub image: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
