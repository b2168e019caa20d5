//! Recipe ingredients: resource locations and tag references.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::registry::RegistryError;

/// A single recipe ingredient: a `namespace:path` resource location, or a
/// `#namespace:path` tag reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ingredient(String);

impl Ingredient {
    /// Parse and validate an ingredient identifier.
    ///
    /// Only identifier *syntax* is checked here; whether the item or tag
    /// actually exists is resolved by the game at recipe-use time.
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        let location = raw.strip_prefix('#').unwrap_or(raw);
        validate_location(location).map_err(|_| RegistryError::InvalidIdentifier(raw.to_string()))?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this ingredient is a `#namespace:path` tag reference.
    pub fn is_tag(&self) -> bool {
        self.0.starts_with('#')
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a bare `namespace:path` (or plain `path`) resource location.
///
/// Namespaces allow `[a-z0-9_.-]`; paths additionally allow `/`. At most one
/// `:` separator. Used for ingredient ids, output ids, and explicit recipe
/// keys alike.
pub(crate) fn validate_location(raw: &str) -> Result<(), RegistryError> {
    let invalid = || RegistryError::InvalidIdentifier(raw.to_string());

    match raw.split_once(':') {
        Some((namespace, path)) => {
            if namespace.is_empty() || !namespace.chars().all(is_namespace_char) {
                return Err(invalid());
            }
            if path.is_empty() || !path.chars().all(is_path_char) {
                return Err(invalid());
            }
            Ok(())
        }
        None => {
            if raw.is_empty() || !raw.chars().all(is_path_char) {
                return Err(invalid());
            }
            Ok(())
        }
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_namespaced_id() {
        let ingredient = Ingredient::parse("create:crushed_raw_iron").unwrap();
        assert_eq!(ingredient.as_str(), "create:crushed_raw_iron");
        assert!(!ingredient.is_tag());
    }

    #[test]
    fn parse_plain_path() {
        // Namespace-less ids are legal; the game defaults the namespace.
        assert!(Ingredient::parse("cobblestone").is_ok());
    }

    #[test]
    fn parse_tag_reference() {
        let ingredient = Ingredient::parse("#forge:ores/iron").unwrap();
        assert!(ingredient.is_tag());
    }

    #[test]
    fn parse_path_with_slashes() {
        assert!(Ingredient::parse("mymod:gears/large/brass").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(matches!(
            Ingredient::parse(""),
            Err(RegistryError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn reject_bare_tag_marker() {
        assert!(Ingredient::parse("#").is_err());
    }

    #[test]
    fn reject_missing_path() {
        assert!(Ingredient::parse("create:").is_err());
    }

    #[test]
    fn reject_missing_namespace() {
        assert!(Ingredient::parse(":stone").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(Ingredient::parse("create: stone").is_err());
        assert!(Ingredient::parse("iron ore").is_err());
    }

    #[test]
    fn reject_uppercase() {
        assert!(Ingredient::parse("Create:Stone").is_err());
    }

    #[test]
    fn reject_embedded_json() {
        // Records sometimes carry object-shaped ingredients; rendered to
        // text they must not slip through as identifiers.
        assert!(Ingredient::parse(r#"{"tag":"forge:ores"}"#).is_err());
        assert!(Ingredient::parse("[\"a\",\"b\"]").is_err());
    }

    #[test]
    fn reject_double_colon() {
        assert!(Ingredient::parse("a:b:c").is_err());
    }

    #[test]
    fn error_names_offending_identifier() {
        let err = Ingredient::parse("bad id").unwrap_err();
        assert!(err.to_string().contains("bad id"));
    }
}
