//! Row predicates pushed down into the scan.
//!
//! Supports expressions of the form: "col OP literal" where OP ∈ {==, !=, <, <=, >, >=}

use fwscan_core::error::{Error, Result};
use fwscan_core::types::{Column, Scalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    fn apply<T: PartialOrd + PartialEq>(&self, lhs: T, rhs: T) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
        }
    }
}

/// A simple comparison predicate over one column. The literal stays textual
/// until evaluation, where it is parsed against the value's actual type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    column: String,
    op: CmpOp,
    literal: String,
}

impl Predicate {
    pub fn new(column: impl Into<String>, op: CmpOp, literal: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op,
            literal: literal.into(),
        }
    }

    /// Parse an expression like "age > 18" or "name == Alice".
    pub fn parse(expr: &str) -> Result<Self> {
        let ops = [
            ("==", CmpOp::Eq),
            ("!=", CmpOp::Ne),
            ("<=", CmpOp::Le),
            (">=", CmpOp::Ge),
            ("<", CmpOp::Lt),
            (">", CmpOp::Gt),
        ];

        for (token, op) in &ops {
            if let Some(pos) = expr.find(token) {
                let column = expr[..pos].trim();
                let literal = expr[pos + token.len()..].trim();
                if column.is_empty() || literal.is_empty() {
                    break;
                }
                return Ok(Self::new(column, *op, literal));
            }
        }

        Err(Error::Predicate(format!("unparseable predicate: {expr}")))
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Evaluate against extracted columns; returns one keep-flag per row.
    pub fn evaluate(&self, columns: &[Column]) -> Result<Vec<bool>> {
        let col = columns
            .iter()
            .find(|c| c.name == self.column)
            .ok_or_else(|| Error::Predicate(format!("column '{}' not found", self.column)))?;

        col.values.iter().map(|v| self.matches(v)).collect()
    }

    /// Evaluate against a single value. Null never matches.
    pub fn matches(&self, value: &Scalar) -> Result<bool> {
        match value {
            Scalar::Null => Ok(false),
            Scalar::Bool(b) => {
                let lit = self.literal.parse::<bool>().map_err(|_| {
                    Error::Predicate(format!("cannot parse '{}' as bool", self.literal))
                })?;
                match self.op {
                    CmpOp::Eq => Ok(*b == lit),
                    CmpOp::Ne => Ok(*b != lit),
                    _ => Err(Error::Predicate(format!(
                        "unsupported op {:?} for bool",
                        self.op
                    ))),
                }
            }
            Scalar::I64(i) => {
                let lit = self.literal.trim().parse::<i64>().map_err(|_| {
                    Error::Predicate(format!("cannot parse '{}' as i64", self.literal))
                })?;
                Ok(self.op.apply(*i, lit))
            }
            Scalar::F64(f) => {
                let lit = self.literal.trim().parse::<f64>().map_err(|_| {
                    Error::Predicate(format!("cannot parse '{}' as f64", self.literal))
                })?;
                Ok(self.op.apply(*f, lit))
            }
            Scalar::Str(s) => Ok(self.op.apply(s.as_str(), self.literal.as_str())),
        }
    }
}
