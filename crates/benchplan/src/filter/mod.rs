//! Flag matrix filters.
//!
//! A filter is a small boolean expression evaluated against one candidate flag
//! assignment, for example `num_vms > 1 and disk_type != 'local'`. The only
//! names in scope are the flags of that assignment.

mod lexer;
mod parser;


use std::cmp::Ordering;
use std::fmt;

use benchplan_config::Flags;
use serde_yaml::Value;
use thiserror::Error;

use lexer::Lexer;
use parser::Parser;

/// Errors raised while compiling or evaluating a filter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterEvaluationError {
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("name \"{0}\" is not bound to a flag")]
    UnboundName(String),

    #[error("cannot apply `{op}` to {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
}

impl CompareOp {
    fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::In => "in",
            CompareOp::NotIn => "not in",
        }
    }
}

/// Filter expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Name(String),
    List(Vec<Expr>),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Evaluates the expression with `flags` as the only bindings.
    pub fn eval(&self, flags: &Flags) -> Result<Value, FilterEvaluationError> {
        match self {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Name(name) => flags
                .get(name)
                .cloned()
                .ok_or_else(|| FilterEvaluationError::UnboundName(name.clone())),
            Expr::List(items) => items
                .iter()
                .map(|item| item.eval(flags))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            Expr::Not(inner) => Ok(Value::Bool(!is_truthy(&inner.eval(flags)?))),
            Expr::And(left, right) => {
                let result = is_truthy(&left.eval(flags)?) && is_truthy(&right.eval(flags)?);
                Ok(Value::Bool(result))
            }
            Expr::Or(left, right) => {
                let result = is_truthy(&left.eval(flags)?) || is_truthy(&right.eval(flags)?);
                Ok(Value::Bool(result))
            }
            Expr::Compare { op, left, right } => {
                let left = left.eval(flags)?;
                let right = right.eval(flags)?;
                compare(*op, &left, &right).map(Value::Bool)
            }
        }
    }
}

/// A compiled filter together with its source text.
///
/// # Example
///
/// ```
/// use benchplan::FlagFilter;
/// use benchplan_config::Flags;
///
/// let filter = FlagFilter::parse("threads >= 4 and mode in ['read', 'randread']").unwrap();
///
/// let mut flags = Flags::new();
/// flags.insert("threads".into(), 8.into());
/// flags.insert("mode".into(), "read".into());
/// assert!(filter.matches(&flags).unwrap());
///
/// flags.insert("threads".into(), 2.into());
/// assert!(!filter.matches(&flags).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FlagFilter {
    source: String,
    expr: Expr,
}

impl FlagFilter {
    /// Compiles a filter expression.
    pub fn parse(source: &str) -> Result<Self, FilterEvaluationError> {
        let tokens = Lexer::new(source).tokenize()?;
        let expr = Parser::new(tokens).parse()?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// Returns true if the flag assignment satisfies the filter.
    pub fn matches(&self, flags: &Flags) -> Result<bool, FilterEvaluationError> {
        self.expr.eval(flags).map(|value| is_truthy(&value))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl fmt::Display for FlagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Truthiness of a flag value.
///
/// Null, false, zero and empty strings, lists and mappings are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "None",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        (Value::Sequence(xs), Value::Sequence(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        _ => a == b,
    }
}

fn compare_numbers(x: &serde_yaml::Number, y: &serde_yaml::Number) -> Option<Ordering> {
    match (x.as_i64(), y.as_i64()) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
    }
}

fn compare(op: CompareOp, left: &Value, right: &Value) -> Result<bool, FilterEvaluationError> {
    let mismatch = || FilterEvaluationError::TypeMismatch {
        op: op.symbol(),
        left: type_name(left),
        right: type_name(right),
    };

    match op {
        CompareOp::Eq => Ok(values_equal(left, right)),
        CompareOp::Ne => Ok(!values_equal(left, right)),
        CompareOp::In | CompareOp::NotIn => {
            let found = match (left, right) {
                (_, Value::Sequence(items)) => items.iter().any(|item| values_equal(left, item)),
                (Value::String(needle), Value::String(haystack)) => haystack.contains(needle.as_str()),
                (_, Value::Mapping(map)) => map.contains_key(left),
                _ => return Err(mismatch()),
            };
            Ok(found == (op == CompareOp::In))
        }
        CompareOp::Lt | CompareOp::Le | CompareOp::Gt | CompareOp::Ge => {
            let ordering = match (left, right) {
                (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
                (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
                (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
                _ => return Err(mismatch()),
            };
            // NaN compares false in every direction
            let Some(ordering) = ordering else {
                return Ok(false);
            };
            Ok(match op {
                CompareOp::Lt => ordering == Ordering::Less,
                CompareOp::Le => ordering != Ordering::Greater,
                CompareOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            })
        }
    }
}
