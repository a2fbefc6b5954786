use crate::errors::Result;
use crate::expression::REQUIRED_PREFIX;
use crate::labels::LabelSet;
use crate::matcher::{ExpressionMatcher, LabelMatcher};
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The set of context filters declared on a change, e.g. `dev, qa and !eu`.
///
/// Each comma-separated token is handed to a [`LabelMatcher`] on its own and
/// the change applies when any token matches. Tokens are stored lower-cased;
/// the text the expression was built from is kept for display only.
///
/// `add` needs `&mut self`, so an expression is assembled first and then
/// shared read-only; concurrent readers need no locking.
#[derive(Debug, Clone, Default)]
pub struct ContextExpression {
    tokens: BTreeSet<String>,
    original: Option<String>,
}

impl ContextExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds from declaration text such as `"Dev, test"`.
    /// Blank text yields no tokens.
    pub fn parse(text: &str) -> Self {
        let mut expr = Self {
            tokens: BTreeSet::new(),
            original: Some(text.to_string()),
        };
        for piece in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            expr.tokens.insert(piece.to_lowercase());
        }
        expr
    }

    /// Builds from already separated labels. Each label becomes one token
    /// as-is (commas inside a label are not split again).
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();
        let tokens = labels.iter().map(|label| label.to_lowercase()).collect();
        let original = labels.join(",");
        Self {
            tokens,
            original: Some(original),
        }
    }

    /// Adds one token; returns `false` when it was already present.
    /// The display text is left untouched.
    pub fn add(&mut self, label: &str) -> bool {
        self.tokens.insert(label.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(&token.to_lowercase())
    }

    pub fn tokens(&self) -> &BTreeSet<String> {
        &self.tokens
    }

    pub fn original_string(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Whether any token carries the `@` required marker.
    pub fn has_required_filter(&self) -> bool {
        self.tokens.iter().any(|t| t.starts_with(REQUIRED_PREFIX))
    }

    /// Matches against `runtime` with the built-in [`ExpressionMatcher`].
    pub fn matches(&self, runtime: Option<&LabelSet>) -> Result<bool> {
        self.matches_with(&ExpressionMatcher, runtime)
    }

    /// Returns whether the change applies under `runtime`.
    ///
    /// No runtime labels, or no declared tokens, always match. Otherwise the
    /// tokens are OR-ed together; matcher errors are returned unchanged.
    pub fn matches_with<M>(&self, matcher: &M, runtime: Option<&LabelSet>) -> Result<bool>
    where
        M: LabelMatcher + ?Sized,
    {
        let has_required = self.has_required_filter();

        let runtime = match runtime {
            Some(labels) if !labels.is_empty() => labels,
            _ => {
                debug!(expression = %self, "no runtime labels, matching by default");
                return Ok(true);
            }
        };

        // `has_required` implies tokens exist, so this only fires on an empty set.
        if self.tokens.is_empty() && !has_required {
            debug!(labels = %runtime, "no context filter declared, matching by default");
            return Ok(true);
        }

        for token in &self.tokens {
            if matcher.evaluate(token, runtime)? {
                debug!(token = token.as_str(), labels = %runtime, "context token matched");
                return Ok(true);
            }
        }
        debug!(expression = %self, labels = %runtime, "no context token matched");
        Ok(false)
    }
}

impl fmt::Display for ContextExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.original {
            Some(text) => f.write_str(text),
            None => write!(f, "({})", self.tokens.iter().join("), (")),
        }
    }
}

impl PartialEq for ContextExpression {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for ContextExpression {}

impl FromStr for ContextExpression {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for ContextExpression {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<Option<&str>> for ContextExpression {
    fn from(text: Option<&str>) -> Self {
        text.map(Self::parse).unwrap_or_default()
    }
}

impl From<Vec<String>> for ContextExpression {
    fn from(labels: Vec<String>) -> Self {
        Self::from_labels(labels)
    }
}

/// Written as the original text when there is one, otherwise as the tokens
/// joined with `,` (or `null` when empty), so it reads back to the same tokens.
impl Serialize for ContextExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.original {
            Some(text) => serializer.serialize_str(text),
            None if self.tokens.is_empty() => serializer.serialize_none(),
            None => serializer.collect_str(&self.tokens.iter().join(",")),
        }
    }
}

impl<'de> Deserialize<'de> for ContextExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from(text.as_deref()))
    }
}
