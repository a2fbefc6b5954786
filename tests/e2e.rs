use context_expression as ce;
use ce::{ContextExpression, LabelSet};

#[test]
fn test_comma_list_is_a_disjunction() {
    assert!(ce::matches("dev,test", "dev").unwrap());
    assert!(ce::matches("dev,test", "TEST").unwrap());
    assert!(!ce::matches("dev,test", "prod").unwrap());
}

#[test]
fn test_empty_runtime_matches_everything() {
    assert!(ce::matches("prod", "").unwrap());
    assert!(ce::matches("@prod", " , ").unwrap());
    assert!(ContextExpression::parse("!dev").matches(None).unwrap());
}

#[test]
fn test_undeclared_contexts_match_everything() {
    assert!(ce::matches("", "prod").unwrap());
    assert!(ce::matches("  ", "dev, qa").unwrap());
}

#[test]
fn test_boolean_tokens() {
    assert!(ce::matches("dev and qa", "qa,dev").unwrap());
    assert!(!ce::matches("dev and qa", "dev").unwrap());
    assert!(ce::matches("!prod", "dev").unwrap());
    assert!(!ce::matches("not prod", "prod").unwrap());
    assert!(ce::matches("(eu or us) and !prod", "us,staging").unwrap());
}

#[test]
fn test_required_tokens_match_like_plain_labels() {
    assert!(ce::matches("@prod", "prod").unwrap());
    assert!(!ce::matches("@prod", "dev").unwrap());
}

#[test]
fn test_inherited_labels_merge_into_child() {
    let parent = ContextExpression::parse("eu");
    let mut child = ContextExpression::parse("dev");
    for token in parent.tokens() {
        child.add(token);
    }
    let runtime = LabelSet::parse("eu");
    assert!(child.matches(Some(&runtime)).unwrap());
    assert_eq!(child.to_string(), "dev");
}

#[test]
fn test_evaluate_single_expression() {
    let labels = LabelSet::parse("a,b");
    assert!(ce::evaluate("a && b", &labels).unwrap());
    assert!(!ce::evaluate("a && !b", &labels).unwrap());
}
