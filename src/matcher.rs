use crate::errors::Result;
use crate::expression::{eval_label_expr, parse_label_expr};
use crate::labels::LabelSet;
use tracing::trace;

/// Decides whether a single context token is satisfied by a set of labels.
///
/// Implementations must be pure: same input, same answer, no side effects.
pub trait LabelMatcher: Send + Sync {
    fn evaluate(&self, expression: &str, labels: &LabelSet) -> Result<bool>;
}

impl<F> LabelMatcher for F
where
    F: Fn(&str, &LabelSet) -> Result<bool> + Send + Sync,
{
    fn evaluate(&self, expression: &str, labels: &LabelSet) -> Result<bool> {
        self(expression, labels)
    }
}

/// Default matcher understanding `and`/`&&`, `or`/`||`, `not`/`!`,
/// parentheses, `:true`/`:false` and `@`-prefixed labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionMatcher;

impl LabelMatcher for ExpressionMatcher {
    fn evaluate(&self, expression: &str, labels: &LabelSet) -> Result<bool> {
        let ast = parse_label_expr(expression)?;
        let matched = eval_label_expr(&ast, labels);
        trace!(expression, %labels, matched, "evaluated label expression");
        Ok(matched)
    }
}
