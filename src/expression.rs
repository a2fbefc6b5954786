// src/expression.rs
use crate::errors::MatchError;
use crate::labels::LabelSet;
use crate::parser::Parser;

/// Marker for a required label, e.g. `@prod`.
pub const REQUIRED_PREFIX: char = '@';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelExpr {
    /// `:true` / `:false`, and the empty expression.
    Const(bool),
    Label { name: String, required: bool },
    Not(Box<LabelExpr>),
    And(Box<LabelExpr>, Box<LabelExpr>),
    Or(Box<LabelExpr>, Box<LabelExpr>),
}

/// Parses one context token, e.g. `dev and !(qa or @prod)`.
pub fn parse_label_expr(input: &str) -> Result<LabelExpr, MatchError> {
    let mut p = Parser::new(input);
    p.skip_ws();
    if p.eof() {
        return Ok(LabelExpr::Const(true));
    }
    let expr = parse_or(&mut p)?;
    p.skip_ws();
    if !p.eof() {
        return Err(p.error("trailing input"));
    }
    Ok(expr)
}

fn parse_or(p: &mut Parser) -> Result<LabelExpr, MatchError> {
    let mut left = parse_and(p)?;
    loop {
        p.skip_ws();
        if p.consume_str("||") || p.consume_keyword("or") {
            let right = parse_and(p)?;
            left = LabelExpr::Or(Box::new(left), Box::new(right));
        } else {
            break;
        }
    }
    Ok(left)
}

fn parse_and(p: &mut Parser) -> Result<LabelExpr, MatchError> {
    let mut left = parse_not(p)?;
    loop {
        p.skip_ws();
        if p.consume_str("&&") || p.consume_keyword("and") {
            let right = parse_not(p)?;
            left = LabelExpr::And(Box::new(left), Box::new(right));
        } else {
            break;
        }
    }
    Ok(left)
}

fn parse_not(p: &mut Parser) -> Result<LabelExpr, MatchError> {
    p.skip_ws();
    if p.consume_char('!') || p.consume_keyword("not") {
        let inner = parse_not(p)?;
        Ok(LabelExpr::Not(Box::new(inner)))
    } else {
        parse_primary(p)
    }
}

fn parse_primary(p: &mut Parser) -> Result<LabelExpr, MatchError> {
    p.skip_ws();
    if p.consume_char('(') {
        let inner = parse_or(p)?;
        p.skip_ws();
        p.expect(')')?;
        return Ok(inner);
    }
    let raw = p.parse_label()?;
    if raw.eq_ignore_ascii_case(":true") {
        return Ok(LabelExpr::Const(true));
    }
    if raw.eq_ignore_ascii_case(":false") {
        return Ok(LabelExpr::Const(false));
    }
    let (name, required) = match raw.strip_prefix(REQUIRED_PREFIX) {
        Some(rest) if !rest.is_empty() => (rest, true),
        Some(_) => return Err(p.error("label expected after '@'")),
        None => (raw, false),
    };
    Ok(LabelExpr::Label {
        name: name.to_lowercase(),
        required,
    })
}

pub fn eval_label_expr(expr: &LabelExpr, labels: &LabelSet) -> bool {
    match expr {
        LabelExpr::Const(b) => *b,
        // Required labels are evaluated like plain ones.
        LabelExpr::Label { name, .. } => labels.contains(name),
        LabelExpr::Not(inner) => !eval_label_expr(inner, labels),
        LabelExpr::And(l, r) => eval_label_expr(l, labels) && eval_label_expr(r, labels),
        LabelExpr::Or(l, r) => eval_label_expr(l, labels) || eval_label_expr(r, labels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn label(name: &str) -> LabelExpr {
        LabelExpr::Label {
            name: name.into(),
            required: false,
        }
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let ast = parse_label_expr("a or b and c").unwrap();
        assert_eq!(
            ast,
            LabelExpr::Or(
                Box::new(label("a")),
                Box::new(LabelExpr::And(Box::new(label("b")), Box::new(label("c")))),
            )
        );
    }

    #[test]
    fn symbolic_and_word_operators_agree() {
        let words = parse_label_expr("NOT a AND (b OR c)").unwrap();
        let symbols = parse_label_expr("!a && (b || c)").unwrap();
        assert_eq!(words, symbols);
    }

    #[test]
    fn required_prefix_is_stripped() {
        assert_eq!(
            parse_label_expr("@Prod").unwrap(),
            LabelExpr::Label {
                name: "prod".into(),
                required: true
            }
        );
    }

    #[test]
    fn literals_and_empty_input() {
        assert_eq!(parse_label_expr(":TRUE").unwrap(), LabelExpr::Const(true));
        assert_eq!(parse_label_expr(":false").unwrap(), LabelExpr::Const(false));
        assert_eq!(parse_label_expr("   ").unwrap(), LabelExpr::Const(true));
    }

    #[test]
    fn malformed_input_is_rejected() {
        for bad in ["(dev", "dev)", "dev and", "!", "@", "dev test"] {
            assert!(parse_label_expr(bad).is_err(), "accepted `{bad}`");
        }
    }

    #[test]
    fn evaluates_against_labels() {
        let labels = LabelSet::parse("dev, qa");
        let ast = parse_label_expr("dev and not prod").unwrap();
        assert!(eval_label_expr(&ast, &labels));
        let ast = parse_label_expr("!(dev || staging)").unwrap();
        assert!(!eval_label_expr(&ast, &labels));
    }
}
