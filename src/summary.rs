use std::{collections::BTreeMap, fmt};

use itertools::Itertools;
use w3c_tokens_core::{TokenOrGroup, TokenTree, TokenType};

/// Token and group counts of a generated tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenSummary {
    pub groups: usize,
    pub untyped: usize,
    pub by_type: BTreeMap<TokenType, usize>,
}
impl TokenSummary {
    pub fn of(tree: &TokenTree) -> Self {
        let mut summary = Self::default();
        summary.visit(tree);
        summary
    }
    fn visit(&mut self, tree: &TokenTree) {
        for node in tree.values() {
            match node {
                TokenOrGroup::Token(token) => match token.type_ {
                    Some(type_) => *self.by_type.entry(type_).or_default() += 1,
                    None => self.untyped += 1,
                },
                TokenOrGroup::Group(group) => {
                    self.groups += 1;
                    self.visit(group);
                }
            }
        }
    }
    pub fn tokens(&self) -> usize {
        self.by_type.values().sum::<usize>() + self.untyped
    }
}
impl fmt::Display for TokenSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self
            .by_type
            .iter()
            .map(|(type_, count)| format!("{}: {count}", type_.as_str()))
            .chain((self.untyped > 0).then(|| format!("untyped: {}", self.untyped)))
            .join(", ");
        write!(f, "{} tokens in {} groups", self.tokens(), self.groups)?;
        if !counts.is_empty() {
            write!(f, " ({counts})")?;
        }
        Ok(())
    }
}

#[test]
fn counts_tokens_and_groups() {
    let primitives = w3c_tokens_core::parse_primitives(
        r##"{
            "palette": { "ink": "oklch(0.2 0.05 250)", "paper": "#fff" },
            "spacing": { "sm": { "value": "0.25rem", "pixel": "4px" }, "md": "0.5rem" },
            "font": { "weight": { "bold": 700 }, "family": "Inter" }
        }"##,
    )
    .unwrap();
    let summary = TokenSummary::of(&w3c_tokens_core::transform(&primitives, ""));
    assert_eq!(summary.groups, 4);
    assert_eq!(summary.untyped, 1);
    assert_eq!(summary.tokens(), 6);
    assert_eq!(summary.by_type[&TokenType::Color], 2);
    assert_eq!(summary.by_type[&TokenType::Dimension], 2);
    assert_eq!(summary.by_type[&TokenType::FontWeight], 1);
    assert_eq!(
        summary.to_string(),
        "6 tokens in 4 groups (color: 2, dimension: 2, fontWeight: 1, untyped: 1)"
    );
}

#[test]
fn empty_tree() {
    let summary = TokenSummary::of(&TokenTree::new());
    assert_eq!(summary.to_string(), "0 tokens in 0 groups");
}
