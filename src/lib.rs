pub mod errors;
pub mod commands;
pub mod context;
pub mod labels;
pub mod matcher;   // pluggable boolean label matching
pub mod record;
mod expression;
mod parser;

use errors::Result;

pub use context::ContextExpression;
pub use expression::REQUIRED_PREFIX;
pub use labels::LabelSet;
pub use matcher::{ExpressionMatcher, LabelMatcher};
pub use record::ChangeRecord;

/// Convenience: does `contexts` apply when `runtime` (comma-separated) is active?
pub fn matches(contexts: &str, runtime: &str) -> Result<bool> {
    let labels = LabelSet::parse(runtime);
    ContextExpression::parse(contexts).matches(Some(&labels))
}

/// Evaluates a single boolean label expression with the built-in matcher.
pub fn evaluate(expression: &str, labels: &LabelSet) -> Result<bool> {
    ExpressionMatcher.evaluate(expression, labels)
}
