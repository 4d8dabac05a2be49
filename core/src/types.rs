use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TokenType {
    #[serde(rename = "color")]
    Color,
    #[serde(rename = "dimension")]
    Dimension,
    #[serde(rename = "fontWeight")]
    FontWeight,
    #[serde(rename = "number")]
    Number,
}
impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::FontWeight => "fontWeight",
            TokenType::Number => "number",
        }
    }
}

/// A leaf gets `type_` when its parent key is one of `parents` or its own key
/// contains one of `fragments`. Matching is case-sensitive.
#[derive(Debug)]
pub struct TypeRule {
    pub parents: &'static [&'static str],
    pub fragments: &'static [&'static str],
    pub type_: TokenType,
}
impl TypeRule {
    pub fn matches(&self, key: &str, parent_key: &str) -> bool {
        self.parents.contains(&parent_key) || self.fragments.iter().any(|f| key.contains(f))
    }
}

/// Evaluated in order, first match wins.
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        parents: &["palette", "color"],
        fragments: &["color", "ink", "surface"],
        type_: TokenType::Color,
    },
    TypeRule {
        parents: &["spacing", "radius", "size"],
        fragments: &["size", "spacing", "radius"],
        type_: TokenType::Dimension,
    },
    TypeRule {
        parents: &["weight"],
        fragments: &[],
        type_: TokenType::FontWeight,
    },
    TypeRule {
        parents: &["leading"],
        fragments: &[],
        type_: TokenType::Number,
    },
];

pub fn determine_type(key: &str, parent_key: &str) -> Option<TokenType> {
    TYPE_RULES
        .iter()
        .find(|rule| rule.matches(key, parent_key))
        .map(|rule| rule.type_)
}

#[test]
fn parent_key_rules() {
    assert_eq!(determine_type("500", "palette"), Some(TokenType::Color));
    assert_eq!(determine_type("brand", "color"), Some(TokenType::Color));
    assert_eq!(determine_type("md", "spacing"), Some(TokenType::Dimension));
    assert_eq!(determine_type("full", "radius"), Some(TokenType::Dimension));
    assert_eq!(determine_type("lg", "size"), Some(TokenType::Dimension));
    assert_eq!(determine_type("bold", "weight"), Some(TokenType::FontWeight));
    assert_eq!(determine_type("tight", "leading"), Some(TokenType::Number));
}

#[test]
fn key_fragment_rules() {
    assert_eq!(determine_type("inkMuted", "brand"), Some(TokenType::Color));
    assert_eq!(determine_type("surface", ""), Some(TokenType::Color));
    assert_eq!(determine_type("bordercolor", "misc"), Some(TokenType::Color));
    assert_eq!(determine_type("iconsize", "misc"), Some(TokenType::Dimension));
    assert_eq!(determine_type("gridspacing", ""), Some(TokenType::Dimension));
    assert_eq!(determine_type("buttonradius", "x"), Some(TokenType::Dimension));
}

#[test]
fn first_match_wins() {
    assert_eq!(determine_type("surfaceSize", "x"), Some(TokenType::Color));
    assert_eq!(determine_type("surface", "spacing"), Some(TokenType::Color));
    assert_eq!(determine_type("ink", "weight"), Some(TokenType::Color));
    assert_eq!(determine_type("size", "leading"), Some(TokenType::Dimension));
}

#[test]
fn fragments_are_case_sensitive_and_unanchored() {
    assert_eq!(determine_type("fontSize", "x"), None);
    assert_eq!(determine_type("Color", "x"), None);
    assert_eq!(determine_type("resize", "x"), Some(TokenType::Dimension));
    assert_eq!(determine_type("thinking", "x"), Some(TokenType::Color));
}

#[test]
fn parent_keys_match_exactly() {
    assert_eq!(determine_type("foo", "bar"), None);
    assert_eq!(determine_type("foo", ""), None);
    assert_eq!(determine_type("bold", "fontWeight"), None);
    assert_eq!(determine_type("normal", "Leading"), None);
    // only the immediate parent is consulted
    assert_eq!(determine_type("sm", "palettes"), None);
}
