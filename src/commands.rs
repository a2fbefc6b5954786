use crate::context::ContextExpression;
use crate::errors::Result;
use crate::labels::LabelSet;
use crate::record::{applicable, records_from_json};
use std::path::Path;

/// `ctxmatch eval`: `"true"` or `"false"` for one context expression.
pub fn eval_command(expression: &str, runtime: Option<&LabelSet>) -> Result<String> {
    let expr = ContextExpression::parse(expression);
    Ok(expr.matches(runtime)?.to_string())
}

/// `ctxmatch filter`: the applicable records of a JSON file, pretty-printed.
pub fn filter_command(records: &Path, runtime: Option<&LabelSet>) -> Result<String> {
    let json = std::fs::read_to_string(records)?;
    let records = records_from_json(&json)?;
    let kept = applicable(&records, runtime)?;
    Ok(serde_json::to_string_pretty(&kept)?)
}
