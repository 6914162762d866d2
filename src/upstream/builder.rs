//! Upstream URL construction.

use url::form_urlencoded::byte_serialize;

/// Query parameter carrying the upstream credential.
pub const CREDENTIAL_PARAM: &str = "key";

/// Ordered query parameters for an upstream call.
///
/// Iteration follows insertion order. Inserting a name twice replaces the
/// value in place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.set(name.into(), Some(value.into()))
    }

    /// Set `name` to the rendered value, or record it as absent.
    pub fn insert_opt<V: ToString>(&mut self, name: impl Into<String>, value: Option<V>) -> &mut Self {
        self.set(name.into(), value.map(|v| v.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, name: String, value: Option<String>) -> &mut Self {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

fn encode(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}

/// Build a fully qualified upstream URL.
///
/// `base` and `endpoint` are joined with exactly one `/`. The credential, when
/// non-empty, is the first query pair; parameters with empty or absent values
/// are skipped.
pub fn build_url(base: &str, endpoint: &str, credential: &str, params: &QueryParams) -> String {
    let mut url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );

    let mut pairs = Vec::with_capacity(params.len() + 1);
    if !credential.is_empty() {
        pairs.push(format!("{}={}", CREDENTIAL_PARAM, encode(credential)));
    }
    for (name, value) in params.iter() {
        match value {
            Some(value) if !value.is_empty() => {
                pairs.push(format!("{}={}", encode(name), encode(value)));
            }
            _ => {}
        }
    }

    if !pairs.is_empty() {
        url.push('?');
        url.push_str(&pairs.join("&"));
    }
    url
}
