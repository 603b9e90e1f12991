use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use rean_survey_core::{AnswerSet, Catalog};
use serde_json::Value;

use crate::error::TokenError;
use crate::types::{deserialize_responses, CatalogId, Envelope, ShareToken};

/// Encodes and decodes share tokens against one catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCodec {
    catalog: Catalog,
}

impl TokenCodec {
    pub const fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Serializes a complete answer set. Identical sets always produce
    /// identical tokens.
    pub fn encode(&self, answers: &AnswerSet) -> Result<ShareToken, TokenError> {
        if !answers.is_complete() {
            return Err(TokenError::Incomplete {
                answered: answers.len(),
                expected: self.catalog.len(),
            });
        }

        let envelope = Envelope {
            v: self.catalog.version(),
            n: self.catalog.len(),
            a: answers.iter().collect(),
        };
        let json = serde_json::to_vec(&envelope)?;
        Ok(ShareToken::new(URL_SAFE_NO_PAD.encode(json)))
    }

    /// Parses a token back into an answer set.
    ///
    /// Missing or foreign positions are accepted as-is; callers gate result
    /// display on [`AnswerSet::is_complete`]. Bare legacy payloads are read
    /// against the current catalog.
    pub fn decode(&self, token: &str) -> Result<AnswerSet, TokenError> {
        let bytes = decode_base64(token)?;
        let value: Value = serde_json::from_slice(&bytes)?;
        let Value::Object(map) = &value else {
            return Err(TokenError::Malformed(format!(
                "expected an object payload, got {}",
                json_kind(&value)
            )));
        };

        let entries = if map.contains_key("v") {
            let envelope: Envelope = serde_json::from_value(value)?;
            let found = CatalogId {
                version: envelope.v,
                len: envelope.n,
            };
            let expected = CatalogId::of(&self.catalog);
            if found != expected {
                return Err(TokenError::CatalogMismatch { expected, found });
            }
            envelope.a
        } else {
            deserialize_responses(value)?
        };

        Ok(AnswerSet::from_entries(self.catalog.len(), entries))
    }
}

/// Encodes against the built-in catalog.
pub fn encode(answers: &AnswerSet) -> Result<ShareToken, TokenError> {
    TokenCodec::default().encode(answers)
}

/// Decodes against the built-in catalog.
pub fn decode(token: &str) -> Result<AnswerSet, TokenError> {
    TokenCodec::default().decode(token)
}

// Accepts URL-safe and standard alphabets, padded or not.
fn decode_base64(token: &str) -> Result<Vec<u8>, TokenError> {
    let trimmed = token.trim().trim_start_matches('#').trim_end_matches('=');
    if trimmed.is_empty() {
        return Err(TokenError::Malformed("empty token".to_string()));
    }
    match URL_SAFE_NO_PAD.decode(trimmed) {
        Ok(bytes) => Ok(bytes),
        Err(url_err) => STANDARD_NO_PAD.decode(trimmed).map_err(|_| url_err.into()),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use rean_survey_core::Response;

    use super::*;

    fn complete(response: Response) -> AnswerSet {
        AnswerSet::from_entries(20, (0..20).map(|p| (p, response)))
    }

    fn b64(json: &str) -> String {
        base64::engine::general_purpose::STANDARD.encode(json)
    }

    #[test]
    fn round_trips_and_is_url_safe() {
        let answers = AnswerSet::from_entries(
            20,
            (0..20).map(|p| (p, if p % 3 == 0 { Response::No } else { Response::Yes })),
        );
        let token = encode(&answers).unwrap_or_else(|e| panic!("encode failed: {e}"));
        assert!(token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        let back = decode(token.as_str()).unwrap_or_else(|e| panic!("decode failed: {e}"));
        assert_eq!(back, answers);
    }

    #[test]
    fn refuses_to_encode_partial_sets() {
        let answers = AnswerSet::from_entries(20, [(0, Response::Yes)]);
        let err = encode(&answers).err();
        assert!(matches!(
            err,
            Some(TokenError::Incomplete {
                answered: 1,
                expected: 20
            })
        ));
    }

    #[test]
    fn rejects_non_base64() {
        let err = decode("not-valid-base64!!").err();
        assert!(err.is_some_and(|e| e.is_malformed()));
        assert!(decode("").err().is_some_and(|e| e.is_malformed()));
    }

    #[test]
    fn rejects_non_object_payloads() {
        for payload in ["[1,2,3]", "\"yes\"", "42", "null", "{not json"] {
            let err = decode(&b64(payload)).err();
            assert!(
                err.as_ref().is_some_and(TokenError::is_malformed),
                "payload {payload} gave {err:?}"
            );
        }
    }

    #[test]
    fn rejects_non_response_values_and_keys() {
        assert!(decode(&b64(r#"{"0":"maybe"}"#)).is_err());
        assert!(decode(&b64(r#"{"zero":"yes"}"#)).is_err());
        assert!(decode(&b64(r#"{"-1":"yes"}"#)).is_err());
        assert!(decode(&b64(r#"{"0":true}"#)).is_err());
    }

    #[test]
    fn response_values_ignore_letter_case() {
        let json = (0..20)
            .map(|p| format!("\"{p}\":\"{}\"", if p == 0 { "Yes" } else { "NO" }))
            .collect::<Vec<_>>()
            .join(",");
        let answers = decode(&b64(&format!("{{{json}}}")))
            .unwrap_or_else(|e| panic!("mixed-case decode failed: {e}"));
        assert!(answers.is_complete());
        assert_eq!(answers.get(0), Some(Response::Yes));
        assert_eq!(answers.get(19), Some(Response::No));

        let envelope = b64(r#"{"v":1,"n":20,"a":{"3":"yEs"}}"#);
        let answers = decode(&envelope).unwrap_or_else(|e| panic!("envelope decode failed: {e}"));
        assert_eq!(answers.get(3), Some(Response::Yes));
    }

    #[test]
    fn accepts_legacy_bare_objects() {
        // Same shape the browser build produced with btoa(JSON.stringify(..)).
        let json = (0..20)
            .map(|p| format!("\"{p}\":\"yes\""))
            .collect::<Vec<_>>()
            .join(",");
        let token = b64(&format!("{{{json}}}"));
        let answers = decode(&token).unwrap_or_else(|e| panic!("legacy decode failed: {e}"));
        assert_eq!(answers, complete(Response::Yes));
    }

    #[test]
    fn lenient_about_missing_and_foreign_positions() {
        let answers = decode(&b64(r#"{"0":"no","5":"yes","99":"no"}"#))
            .unwrap_or_else(|e| panic!("lenient decode failed: {e}"));
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get(99), Some(Response::No));
        assert!(!answers.is_complete());
    }

    #[test]
    fn rejects_other_catalog_versions() {
        let stale = b64(r#"{"v":0,"n":20,"a":{"0":"yes"}}"#);
        let err = decode(&stale).err();
        assert!(matches!(
            err,
            Some(TokenError::CatalogMismatch { found, .. }) if found.version == 0
        ));

        let resized = b64(r#"{"v":1,"n":21,"a":{}}"#);
        assert!(matches!(
            decode(&resized).err(),
            Some(TokenError::CatalogMismatch { .. })
        ));
    }

    #[test]
    fn tolerates_leading_hash() {
        let token = encode(&complete(Response::No)).unwrap_or_else(|e| panic!("{e}"));
        let answers = decode(&format!("#{token}")).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(answers, complete(Response::No));
    }
}
