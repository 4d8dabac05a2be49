use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorSpace {
    #[serde(rename = "oklch")]
    Oklch,
}

/// Structured form of an `oklch(L C H)` color string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OklchColor {
    pub color_space: ColorSpace,
    #[serde(serialize_with = "js_numbers")]
    pub components: [f64; 3],
    #[serde(serialize_with = "js_number")]
    pub alpha: f64,
}
impl OklchColor {
    pub fn new(lightness: f64, chroma: f64, hue: f64) -> Self {
        Self {
            color_space: ColorSpace::Oklch,
            components: [lightness, chroma, hue],
            alpha: 1.0,
        }
    }
    /// Finds the first `oklch(L C H)` in `value`. Alpha channels, signs and
    /// exponents are not part of the accepted syntax.
    pub fn parse(value: &str) -> Option<Self> {
        oklch_parser::find(value).ok()
    }
}

// Integral values are written without a fractional part so the output stays
// identical to JSON produced by JavaScript tooling (`250`, not `250.0`).
struct JsNumber(f64);
impl Serialize for JsNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}
fn js_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    JsNumber(*value).serialize(serializer)
}
fn js_numbers<S>(values: &[f64; 3], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(values.iter().map(|v| JsNumber(*v)))
}

peg::parser! {
  grammar oklch_parser() for str {
    rule _ = quiet!{[c if c.is_whitespace()]*}
    rule __ = quiet!{[c if c.is_whitespace()]+}

    rule component() -> f64
        = n:$(['0'..='9']+ ("." ['0'..='9']*)? / "." ['0'..='9']+) {? n.parse().or(Err("number")) }

    rule color() -> OklchColor
        = "oklch(" _ l:component() __ c:component() __ h:component() _ ")" { OklchColor::new(l, c, h) }

    pub(crate) rule find() -> OklchColor
        = (!color() [_])* c:color() [_]* { c }
  }
}

#[test]
fn parses_components() {
    assert_eq!(
        OklchColor::parse("oklch(0.7 0.15 180)"),
        Some(OklchColor::new(0.7, 0.15, 180.0))
    );
    assert_eq!(
        OklchColor::parse("oklch(  .5   1.  42  )"),
        Some(OklchColor::new(0.5, 1.0, 42.0))
    );
    assert_eq!(
        OklchColor::parse("oklch(0.2\t0.05\n250)"),
        Some(OklchColor::new(0.2, 0.05, 250.0))
    );
}

#[test]
fn match_is_unanchored() {
    assert_eq!(
        OklchColor::parse("oklch-brand: oklch(0.6 0.1 30) !important"),
        Some(OklchColor::new(0.6, 0.1, 30.0))
    );
}

#[test]
fn rejects_malformed() {
    for value in [
        "oklch(bad)",
        "oklch(0.5 0.1)",
        "oklch(0.5 0.1 30 / 0.5)",
        "oklch(-0.5 0.1 30)",
        "oklch(1e2 0.1 30)",
        "oklch(1.2.3 0.1 30)",
        "oklch(. 0.1 30)",
        "oklch(0.50.1 30)",
        "oklch (0.5 0.1 30)",
        "oklch",
    ] {
        assert_eq!(OklchColor::parse(value), None, "{value}");
    }
}

#[test]
fn serializes_like_javascript() {
    assert_eq!(
        serde_json::to_string(&OklchColor::new(0.2, 0.05, 250.0)).unwrap(),
        r#"{"colorSpace":"oklch","components":[0.2,0.05,250],"alpha":1}"#
    );
}
