use indexmap::IndexMap;
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

pub use oklch::{ColorSpace, OklchColor};
pub use types::{determine_type, TokenType, TypeRule, TYPE_RULES};
mod oklch;
pub mod types;

pub type Primitives = IndexMap<String, Primitive>;
pub type TokenTree = IndexMap<String, TokenOrGroup>;

pub fn parse_primitives(data: &str) -> serde_json::Result<Primitives> {
    serde_json::from_str(data)
}

/// Converts a primitives tree into W3C design tokens. `parent_key` is the key
/// the group was reached under, empty for the root.
pub fn transform(group: &Primitives, parent_key: &str) -> TokenTree {
    group
        .iter()
        .map(|(key, value)| (key.clone(), value.to_token(key, parent_key)))
        .collect()
}

// Decoded through `serde_json::Value` so duplicate keys resolve last-wins and
// the shape is decided in a fixed order: dimension pair, group, list, scalar.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Primitive {
    Scalar(Scalar),
    List(Vec<Primitive>),
    Dimension {
        value: serde_json::Value,
        pixel: serde_json::Value,
    },
    Group(Primitives),
}
impl From<serde_json::Value> for Primitive {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Object(mut map) if map.contains_key("value") && map.contains_key("pixel") => {
                Primitive::Dimension {
                    value: map.remove("value").unwrap_or_default(),
                    pixel: map.remove("pixel").unwrap_or_default(),
                }
            }
            Value::Object(map) => Primitive::Group(
                map.into_iter()
                    .map(|(key, value)| (key, Primitive::from(value)))
                    .collect(),
            ),
            Value::Array(items) => Primitive::List(items.into_iter().map(Primitive::from).collect()),
            Value::String(value) => Primitive::Scalar(Scalar::String(value)),
            Value::Number(value) => Primitive::Scalar(Scalar::Number(value)),
            Value::Bool(value) => Primitive::Scalar(Scalar::Bool(value)),
            Value::Null => Primitive::Scalar(Scalar::Null),
        }
    }
}
impl Primitive {
    fn to_token(&self, key: &str, parent_key: &str) -> TokenOrGroup {
        match self {
            Primitive::Dimension { value, pixel } => {
                TokenOrGroup::Token(Token::dimension(value.clone(), pixel.clone()))
            }
            Primitive::Scalar(scalar) => {
                TokenOrGroup::Token(Token::from_scalar(scalar, key, parent_key))
            }
            Primitive::List(items) => TokenOrGroup::Group(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let index = index.to_string();
                        let token = item.to_token(&index, key);
                        (index, token)
                    })
                    .collect(),
            ),
            Primitive::Group(group) => TokenOrGroup::Group(transform(group, key)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenOrGroup {
    Token(Token),
    Group(TokenTree),
}
impl TokenOrGroup {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            TokenOrGroup::Token(token) => Some(token),
            TokenOrGroup::Group(_) => None,
        }
    }
    pub fn as_group(&self) -> Option<&TokenTree> {
        match self {
            TokenOrGroup::Token(_) => None,
            TokenOrGroup::Group(group) => Some(group),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub type_: Option<TokenType>,
    pub value: TokenValue,
    pub description: Option<serde_json::Value>,
}
impl Token {
    pub fn dimension(value: serde_json::Value, pixel: serde_json::Value) -> Self {
        Self {
            type_: Some(TokenType::Dimension),
            value: TokenValue::Json(value),
            description: Some(pixel),
        }
    }
    pub fn from_scalar(scalar: &Scalar, key: &str, parent_key: &str) -> Self {
        if let Scalar::String(value) = scalar {
            if value.starts_with("oklch") {
                match OklchColor::parse(value) {
                    Some(color) => {
                        return Self {
                            type_: Some(TokenType::Color),
                            value: TokenValue::Color(color),
                            description: None,
                        }
                    }
                    None => tracing::debug!(key, value = %value, "keeping unparsable oklch value as a string"),
                }
            }
        }
        Self {
            type_: determine_type(key, parent_key),
            value: TokenValue::Scalar(scalar.clone()),
            description: None,
        }
    }
}
// Dimension tokens lead with `$type`, plain tokens with `$value`, matching the
// layout of previously generated files.
impl Serialize for Token {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match &self.description {
            Some(description) => {
                if let Some(type_) = &self.type_ {
                    map.serialize_entry("$type", type_)?;
                }
                map.serialize_entry("$value", &self.value)?;
                map.serialize_entry("$description", description)?;
            }
            None => {
                map.serialize_entry("$value", &self.value)?;
                if let Some(type_) = &self.type_ {
                    map.serialize_entry("$type", type_)?;
                }
            }
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Color(OklchColor),
    Scalar(Scalar),
    Json(serde_json::Value),
}

#[cfg(test)]
fn transform_json(input: serde_json::Value) -> serde_json::Value {
    let primitives: Primitives = serde_json::from_value(input).unwrap();
    serde_json::to_value(transform(&primitives, "")).unwrap()
}

#[test]
fn end_to_end() {
    let output = transform_json(serde_json::json!({
        "palette": { "ink": "oklch(0.2 0.05 250)" },
        "spacing": { "sm": { "value": "0.25rem", "pixel": "4px" } }
    }));
    assert_eq!(
        output,
        serde_json::json!({
            "palette": {
                "ink": {
                    "$value": { "colorSpace": "oklch", "components": [0.2, 0.05, 250], "alpha": 1 },
                    "$type": "color"
                }
            },
            "spacing": {
                "sm": { "$type": "dimension", "$value": "0.25rem", "$description": "4px" }
            }
        })
    );
}

#[test]
fn dimension_pair_takes_priority() {
    let output = transform_json(serde_json::json!({
        "palette": {
            "inkColor": { "value": "1rem", "pixel": "16px" },
            "oklch": { "value": "oklch(0.5 0.1 20)", "pixel": "n/a" }
        }
    }));
    assert_eq!(
        output,
        serde_json::json!({
            "palette": {
                "inkColor": { "$type": "dimension", "$value": "1rem", "$description": "16px" },
                "oklch": { "$type": "dimension", "$value": "oklch(0.5 0.1 20)", "$description": "n/a" }
            }
        })
    );
}

#[test]
fn dimension_pair_ignores_extra_fields() {
    let output = transform_json(serde_json::json!({
        "gap": { "value": { "min": 4, "max": 8 }, "pixel": null, "note": "fluid" }
    }));
    assert_eq!(
        output,
        serde_json::json!({
            "gap": { "$type": "dimension", "$value": { "min": 4, "max": 8 }, "$description": null }
        })
    );
}

#[test]
fn oklch_passthrough_uses_key_inference() {
    let output = transform_json(serde_json::json!({
        "bar": { "foo": "oklch(bad)", "plain": "baz" },
        "palette": { "accent": "oklch(bad)" },
        "misc": { "oklchish": "oklchish" }
    }));
    assert_eq!(
        output,
        serde_json::json!({
            "bar": { "foo": { "$value": "oklch(bad)" }, "plain": { "$value": "baz" } },
            "palette": { "accent": { "$value": "oklch(bad)", "$type": "color" } },
            "misc": { "oklchish": { "$value": "oklchish" } }
        })
    );
}

#[test]
fn oklch_overrides_inferred_type() {
    let output = transform_json(serde_json::json!({
        "spacing": { "md": "oklch(0.7 0.15 180)" }
    }));
    assert_eq!(
        output,
        serde_json::json!({
            "spacing": {
                "md": {
                    "$value": { "colorSpace": "oklch", "components": [0.7, 0.15, 180], "alpha": 1 },
                    "$type": "color"
                }
            }
        })
    );
}

#[test]
fn scalars_keep_their_json_type() {
    let output = transform_json(serde_json::json!({
        "weight": { "bold": 700 },
        "leading": { "tight": 1.25 },
        "flags": { "enabled": true, "unset": null }
    }));
    assert_eq!(
        output,
        serde_json::json!({
            "weight": { "bold": { "$value": 700, "$type": "fontWeight" } },
            "leading": { "tight": { "$value": 1.25, "$type": "number" } },
            "flags": { "enabled": { "$value": true }, "unset": { "$value": null } }
        })
    );
}

#[test]
fn type_uses_immediate_parent_only() {
    let output = transform_json(serde_json::json!({
        "spacing": { "sm": { "value": "0.25rem" }, "scale": { "lg": "2rem" } }
    }));
    assert_eq!(
        output,
        serde_json::json!({
            "spacing": {
                "sm": { "value": { "$value": "0.25rem" } },
                "scale": { "lg": { "$value": "2rem" } }
            }
        })
    );
}

#[test]
fn arrays_become_indexed_groups() {
    let output = transform_json(serde_json::json!({
        "palette": ["oklch(1 0 0)", "#000"],
        "pair": ["a", "b"]
    }));
    assert_eq!(
        output,
        serde_json::json!({
            "palette": {
                "0": {
                    "$value": { "colorSpace": "oklch", "components": [1, 0, 0], "alpha": 1 },
                    "$type": "color"
                },
                "1": { "$value": "#000", "$type": "color" }
            },
            "pair": { "0": { "$value": "a" }, "1": { "$value": "b" } }
        })
    );
}

#[test]
fn keeps_shape_and_order() {
    let primitives = parse_primitives(
        r#"{"z": {"b": "1", "a": {}}, "size": {"y": {"value": "1px", "pixel": "1px"}, "x": 2}}"#,
    )
    .unwrap();
    let tokens = transform(&primitives, "");
    assert_eq!(tokens.keys().collect::<Vec<_>>(), ["z", "size"]);
    let z = tokens["z"].as_group().unwrap();
    assert_eq!(z.keys().collect::<Vec<_>>(), ["b", "a"]);
    assert_eq!(z["a"].as_group().map(|g| g.len()), Some(0));
    assert_eq!(
        serde_json::to_string(&tokens).unwrap(),
        concat!(
            r#"{"z":{"b":{"$value":"1"},"a":{}},"#,
            r#""size":{"y":{"$type":"dimension","$value":"1px","$description":"1px"},"#,
            r#""x":{"$value":2,"$type":"dimension"}}}"#
        )
    );
}

#[test]
fn duplicate_keys_keep_last_value() {
    let primitives = parse_primitives(
        r#"{
            "spacing": {
                "sm": { "value": "a", "value": "b", "pixel": "p" },
                "md": "1rem",
                "lg": "2rem",
                "md": "3rem"
            }
        }"#,
    )
    .unwrap();
    assert_eq!(
        serde_json::to_string(&transform(&primitives, "")).unwrap(),
        concat!(
            r#"{"spacing":{"sm":{"$type":"dimension","$value":"b","$description":"p"},"#,
            r#""md":{"$value":"3rem","$type":"dimension"},"#,
            r#""lg":{"$value":"2rem","$type":"dimension"}}}"#
        )
    );
}

#[test]
fn root_must_be_an_object() {
    assert!(parse_primitives("[]").is_err());
    assert!(parse_primitives("\"oklch(1 1 1)\"").is_err());
    assert!(parse_primitives("{").is_err());
    assert_eq!(parse_primitives("{}").unwrap().len(), 0);
}
