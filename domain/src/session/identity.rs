//! Per-request session and visitor identifiers.
//!
//! The endpoint expects both ids on every call. They are regenerated for each
//! request in the form `<prefix>-<unix millis>-<9 lowercase alphanumerics>`.

use serde::Serialize;

const SUFFIX_LEN: usize = 9;

fn generate_with_prefix(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, millis, &random[..SUFFIX_LEN])
}

macro_rules! request_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Generate a fresh identifier
            pub fn generate() -> Self {
                Self(generate_with_prefix(Self::PREFIX))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

request_id!(SessionId, "session");
request_id!(VisitorId, "visitor");

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_shape(id: &str, prefix: &str) {
        let (millis, suffix) = id
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|rest| rest.split_once('-'))
            .unwrap_or_else(|| panic!("malformed id {id}"));
        assert!(millis.parse::<i64>().unwrap() > 0, "{id}");
        assert_eq!(suffix.len(), SUFFIX_LEN, "{id}");
        assert!(
            suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()),
            "{id}"
        );
    }

    #[test]
    fn generated_ids_have_expected_shape() {
        assert_shape(SessionId::generate().as_str(), SessionId::PREFIX);
        assert_shape(VisitorId::generate().as_str(), VisitorId::PREFIX);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(SessionId::generate(), SessionId::generate());
        assert_ne!(VisitorId::generate(), VisitorId::generate());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = SessionId::generate();
        assert_eq!(
            serde_json::to_value(&id).unwrap(),
            serde_json::Value::String(id.to_string())
        );
    }
}
