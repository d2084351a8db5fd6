//! Evaluation of dependency `condition` expressions.
//!
//! A dependency may carry a `condition` attribute such as
//! `$VERSION >= 1.2 and $VERSION != 1.4.0`. The expression language is
//! pluggable through [`ConditionEvaluator`]; [`Rep149Evaluator`] implements
//! the small boolean language used by ROS-style package manifests:
//!
//! - `$NAME` variables, with `$VERSION` bound to the candidate version and
//!   unknown variables evaluating to the empty string
//! - bare (`foo`, `1.2.3`) and quoted (`"a b"`, `'a b'`) literals
//! - comparisons `==`, `!=`, `<`, `<=`, `>`, `>=`
//! - `and`, `or` and parentheses (`and` binds tighter than `or`)
//!
//! When both operands of a comparison parse as version triplets they are
//! compared numerically, otherwise as strings.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::version::VersionTriplet;

/// Name of the variable bound to the candidate version.
pub const VERSION_VARIABLE: &str = "VERSION";

/// Maximum parenthesis nesting accepted by [`Rep149Evaluator`].
pub const MAX_NESTING: usize = 64;

/// Errors produced while evaluating a condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    /// The expression contains a character that starts no token.
    #[error("unexpected character at offset {offset} in condition '{condition}'")]
    InvalidCharacter { condition: String, offset: usize },

    /// A token appeared where it is not allowed.
    #[error("unexpected token '{token}' in condition")]
    UnexpectedToken { token: String },

    /// The expression ended early.
    #[error("condition ended unexpectedly")]
    UnexpectedEnd,

    /// The expression is empty.
    #[error("condition is empty")]
    Empty,

    /// Parentheses are nested more deeply than [`MAX_NESTING`].
    #[error("condition nests parentheses deeper than {max}")]
    TooDeep { max: usize },
}

/// Evaluates a dependency condition against a candidate version.
///
/// Implementations must be pure: the same condition and version always
/// yield the same answer.
pub trait ConditionEvaluator: Send + Sync {
    /// Evaluate `condition` with the version variable bound to `version`.
    fn evaluate(&self, condition: &str, version: &str) -> Result<bool, ConditionError>;
}

/// Built-in evaluator for ROS REP 149 style condition expressions.
///
/// # Example
///
/// ```
/// use pkgmeta::metadata::{ConditionEvaluator, Rep149Evaluator};
///
/// let eval = Rep149Evaluator::new().with_variable("PLATFORM", "linux");
///
/// assert!(eval.evaluate("$VERSION >= 1.2", "1.10").unwrap());
/// assert!(eval.evaluate("$PLATFORM == linux and $VERSION != 2", "1.0").unwrap());
/// assert!(!eval.evaluate("$UNSET == something", "1.0").unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rep149Evaluator {
    variables: HashMap<String, String>,
}

impl Rep149Evaluator {
    /// Create an evaluator with only `$VERSION` bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an additional variable (builder pattern).
    ///
    /// A binding named `VERSION` is shadowed by the candidate version.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

impl ConditionEvaluator for Rep149Evaluator {
    fn evaluate(&self, condition: &str, version: &str) -> Result<bool, ConditionError> {
        let tokens = tokenize(condition)?;
        if tokens.is_empty() {
            return Err(ConditionError::Empty);
        }

        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            depth: 0,
            variables: &self.variables,
            version,
        };
        let result = parser.or_expr()?;

        match parser.peek() {
            None => Ok(result),
            Some(token) => Err(ConditionError::UnexpectedToken {
                token: token.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Op {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "==" => Some(Op::Eq),
            "!=" => Some(Op::Ne),
            "<" => Some(Op::Lt),
            "<=" => Some(Op::Le),
            ">" => Some(Op::Gt),
            ">=" => Some(Op::Ge),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Lt => ordering == Ordering::Less,
            Op::Le => ordering != Ordering::Greater,
            Op::Gt => ordering == Ordering::Greater,
            Op::Ge => ordering != Ordering::Less,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    And,
    Or,
    Op(Op),
    Variable(String),
    Literal(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Op(op) => write!(f, "{}", op.as_str()),
            Token::Variable(name) => write!(f, "${}", name),
            Token::Literal(value) => write!(f, "{}", value),
        }
    }
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(
            r#"^(?:(?P<open>\()|(?P<close>\))|(?P<op>==|!=|<=|>=|<|>)|\$(?P<var>[A-Za-z_][A-Za-z0-9_]*)|"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<word>[A-Za-z0-9_.+~\-]+))"#,
        )
        .expect("token pattern is valid")
    })
}

fn tokenize(condition: &str) -> Result<Vec<Token>, ConditionError> {
    let re = token_regex();
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < condition.len() {
        let rest = &condition[offset..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        offset += rest.len() - trimmed.len();

        let caps = re
            .captures(trimmed)
            .ok_or_else(|| ConditionError::InvalidCharacter {
                condition: condition.to_string(),
                offset,
            })?;

        let token = if caps.name("open").is_some() {
            Token::Open
        } else if caps.name("close").is_some() {
            Token::Close
        } else if let Some(op) = caps.name("op").and_then(|m| Op::parse(m.as_str())) {
            Token::Op(op)
        } else if let Some(var) = caps.name("var") {
            Token::Variable(var.as_str().to_string())
        } else if let Some(quoted) = caps.name("dq").or_else(|| caps.name("sq")) {
            Token::Literal(quoted.as_str().to_string())
        } else {
            match caps.name("word").map(|m| m.as_str()).unwrap_or_default() {
                "and" => Token::And,
                "or" => Token::Or,
                word => Token::Literal(word.to_string()),
            }
        };

        offset += caps.get(0).map(|m| m.len()).unwrap_or(0);
        tokens.push(token);
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    variables: &'a HashMap<String, String>,
    version: &'a str,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Result<&'a Token, ConditionError> {
        let token = self.tokens.get(self.pos).ok_or(ConditionError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn or_expr(&mut self) -> Result<bool, ConditionError> {
        let mut value = self.and_expr()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            // no short-circuit, the right side must still parse
            let rhs = self.and_expr()?;
            value = value || rhs;
        }
        Ok(value)
    }

    fn and_expr(&mut self) -> Result<bool, ConditionError> {
        let mut value = self.primary()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let rhs = self.primary()?;
            value = value && rhs;
        }
        Ok(value)
    }

    fn primary(&mut self) -> Result<bool, ConditionError> {
        if self.peek() == Some(&Token::Open) {
            self.pos += 1;
            self.depth += 1;
            if self.depth > MAX_NESTING {
                return Err(ConditionError::TooDeep { max: MAX_NESTING });
            }
            let value = self.or_expr()?;
            self.depth -= 1;
            return match self.advance()? {
                Token::Close => Ok(value),
                other => Err(ConditionError::UnexpectedToken {
                    token: other.to_string(),
                }),
            };
        }

        let lhs = self.operand()?;
        let op = match self.advance()? {
            Token::Op(op) => *op,
            other => {
                return Err(ConditionError::UnexpectedToken {
                    token: other.to_string(),
                })
            }
        };
        let rhs = self.operand()?;

        Ok(op.holds(compare(&lhs, &rhs)))
    }

    fn operand(&mut self) -> Result<String, ConditionError> {
        match self.advance()? {
            Token::Variable(name) if name == VERSION_VARIABLE => Ok(self.version.to_string()),
            Token::Variable(name) => Ok(self.variables.get(name).cloned().unwrap_or_default()),
            Token::Literal(value) => Ok(value.clone()),
            other => Err(ConditionError::UnexpectedToken {
                token: other.to_string(),
            }),
        }
    }
}

fn compare(lhs: &str, rhs: &str) -> Ordering {
    match (
        VersionTriplet::parse_lenient(lhs),
        VersionTriplet::parse_lenient(rhs),
    ) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => lhs.cmp(rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(condition: &str, version: &str) -> Result<bool, ConditionError> {
        Rep149Evaluator::new().evaluate(condition, version)
    }

    #[test]
    fn test_version_comparisons() {
        assert!(eval("$VERSION == 1.2.3", "1.2.3").unwrap());
        assert!(eval("$VERSION == 1.2", "1.2.0").unwrap());
        assert!(eval("$VERSION >= 1.2", "1.10").unwrap());
        assert!(!eval("$VERSION < 1.0", "1.0.0").unwrap());
        assert!(eval("$VERSION != 2", "1.9").unwrap());
        assert!(eval("$VERSION <= 0.9.9", "0.9.9").unwrap());
        assert!(eval("$VERSION > 0.9.9", "1").unwrap());
    }

    #[test]
    fn test_string_comparison_for_non_versions() {
        assert!(eval("$VERSION == latest", "latest").unwrap());
        assert!(eval("$VERSION != latest", "nightly").unwrap());
        assert!(eval("abc < abd", "").unwrap());
    }

    #[test]
    fn test_boolean_operators_and_precedence() {
        assert!(eval("$VERSION >= 1 and $VERSION < 2", "1.5").unwrap());
        assert!(!eval("$VERSION >= 1 and $VERSION < 2", "2.0").unwrap());
        assert!(eval("$VERSION == 3 or $VERSION == 1.5", "1.5").unwrap());
        // and binds tighter than or
        assert!(eval("1 == 1 or 1 == 2 and 1 == 3", "").unwrap());
        assert!(!eval("(1 == 1 or 1 == 2) and 1 == 3", "").unwrap());
    }

    #[test]
    fn test_quoted_literals() {
        assert!(eval(r#"$VERSION == "1.0 beta""#, "1.0 beta").unwrap());
        assert!(eval("$VERSION == '2'", "2.0").unwrap());
    }

    #[test]
    fn test_extra_and_unknown_variables() {
        let eval = Rep149Evaluator::new().with_variable("ROS_VERSION", "2");
        assert!(eval.evaluate("$ROS_VERSION == 2", "0").unwrap());
        assert!(eval.evaluate("$MISSING == ''", "0").unwrap());
    }

    #[test]
    fn test_version_variable_cannot_be_overridden() {
        let eval = Rep149Evaluator::new().with_variable("VERSION", "9.9.9");
        assert!(eval.evaluate("$VERSION == 1.0", "1.0").unwrap());
    }

    fn nested(depth: usize) -> String {
        format!("{}$VERSION == 1{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_limit() {
        assert_eq!(eval(&nested(MAX_NESTING), "1"), Ok(true));
        assert_eq!(
            eval(&nested(MAX_NESTING + 1), "1"),
            Err(ConditionError::TooDeep { max: MAX_NESTING })
        );
        assert_eq!(
            eval(&nested(20_000), "1"),
            Err(ConditionError::TooDeep { max: MAX_NESTING })
        );
    }

    #[test]
    fn test_sibling_groups_do_not_accumulate_depth() {
        let condition = vec!["($VERSION == 1)"; MAX_NESTING + 10].join(" and ");
        assert_eq!(eval(&condition, "1"), Ok(true));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(eval("", "1"), Err(ConditionError::Empty));
        assert_eq!(eval("   ", "1"), Err(ConditionError::Empty));
        assert_eq!(eval("$VERSION ==", "1"), Err(ConditionError::UnexpectedEnd));
        assert!(matches!(
            eval("$VERSION 1.0", "1"),
            Err(ConditionError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            eval("($VERSION == 1", "1"),
            Err(ConditionError::UnexpectedEnd)
        ));
        assert!(matches!(
            eval("$VERSION == 1 )", "1"),
            Err(ConditionError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            eval("$VERSION == 1 & 2", "1"),
            Err(ConditionError::InvalidCharacter { offset: 14, .. })
        ));
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("($VERSION>=1.0)and x").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Open,
                Token::Variable("VERSION".to_string()),
                Token::Op(Op::Ge),
                Token::Literal("1.0".to_string()),
                Token::Close,
                Token::And,
                Token::Literal("x".to_string()),
            ]
        );
    }
}
