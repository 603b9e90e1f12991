use std::collections::BTreeMap;
use std::fmt;

use rean_survey_core::{Catalog, Response};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Version and length of the catalog a token was produced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogId {
    pub version: u32,
    pub len: usize,
}

impl CatalogId {
    pub const fn of(catalog: &Catalog) -> Self {
        Self {
            version: catalog.version(),
            len: catalog.len(),
        }
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}/{}", self.version, self.len)
    }
}

/// Opaque, URL-fragment safe encoding of a complete answer set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareToken(String);

impl ShareToken {
    pub(crate) const fn new(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShareToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonical payload: catalog identity plus responses keyed by position.
/// Integer keys serialize as JSON object keys in ascending order.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Envelope {
    pub v: u32,
    pub n: usize,
    #[serde(deserialize_with = "deserialize_responses")]
    pub a: BTreeMap<usize, Response>,
}

/// Tokens produced before catalog identity was embedded: a bare
/// position-to-response object.
pub(crate) type LegacyPayload = BTreeMap<usize, Response>;

// Values match "yes"/"no" in any letter case so hand-edited links still
// load. Anything else fails the whole token: a partially understood set
// could otherwise be shown as someone's result.
pub(crate) fn deserialize_responses<'de, D>(deserializer: D) -> Result<LegacyPayload, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<usize, String>::deserialize(deserializer)?
        .into_iter()
        .map(|(position, value)| {
            parse_response(&value).map(|response| (position, response)).ok_or_else(|| {
                D::Error::custom(format!("unknown response {value:?} at position {position}"))
            })
        })
        .collect()
}

fn parse_response(value: &str) -> Option<Response> {
    if value.eq_ignore_ascii_case("yes") {
        Some(Response::Yes)
    } else if value.eq_ignore_ascii_case("no") {
        Some(Response::No)
    } else {
        None
    }
}
