use crate::context::ContextExpression;
use crate::errors::Result;
use crate::labels::LabelSet;
use serde::{Deserialize, Serialize};

/// One recorded execution of a change, as kept in the change history.
///
/// This is a plain record; the only behavior is reading its `contexts`
/// column back as a [`ContextExpression`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeRecord {
    pub id: Option<String>,
    pub changeset_id: Option<String>,
    pub changeset_author: Option<String>,
    pub changeset_filename: Option<String>,
    pub description: Option<String>,
    pub comments: Option<String>,
    pub tag: Option<String>,
    /// Version of the tool that ran the change.
    pub tool_version: Option<String>,
    pub labels: Option<String>,
    pub contexts: Option<String>,
    pub order_executed: Option<u32>,
    pub md5sum: Option<String>,
    pub exec_type: Option<String>,
    pub deployment_id: Option<String>,
    /// RFC 3339 timestamp.
    pub date_executed: Option<String>,
}

impl ChangeRecord {
    pub fn context_expression(&self) -> ContextExpression {
        ContextExpression::from(self.contexts.as_deref())
    }

    pub fn applies_to(&self, runtime: Option<&LabelSet>) -> Result<bool> {
        self.context_expression().matches(runtime)
    }
}

/// Parses a JSON array of records.
pub fn records_from_json(json: &str) -> Result<Vec<ChangeRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Keeps the records whose contexts match `runtime`, preserving order.
pub fn applicable<'a>(
    records: &'a [ChangeRecord],
    runtime: Option<&LabelSet>,
) -> Result<Vec<&'a ChangeRecord>> {
    let mut out = Vec::new();
    for record in records {
        if record.applies_to(runtime)? {
            out.push(record);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_camel_case_json() {
        let json = r#"[{"changesetId":"1","changesetAuthor":"ann","contexts":"Dev, QA","orderExecuted":3}]"#;
        let records = records_from_json(json).unwrap();
        assert_eq!(records[0].changeset_author.as_deref(), Some("ann"));
        assert_eq!(records[0].order_executed, Some(3));
        assert_eq!(records[0].context_expression().len(), 2);
    }

    #[test]
    fn missing_contexts_apply_everywhere() {
        let record = ChangeRecord::default();
        assert!(record.applies_to(Some(&LabelSet::parse("prod"))).unwrap());
    }

    #[test]
    fn filters_by_runtime_labels() {
        let records = vec![
            ChangeRecord {
                changeset_id: Some("a".into()),
                contexts: Some("dev".into()),
                ..Default::default()
            },
            ChangeRecord {
                changeset_id: Some("b".into()),
                contexts: Some("prod".into()),
                ..Default::default()
            },
        ];
        let runtime = LabelSet::parse("prod");
        let kept = applicable(&records, Some(&runtime)).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].changeset_id.as_deref(), Some("b"));
    }
}
