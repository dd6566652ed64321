use std::fmt;

/// The builtin functions callable from grade expressions.
///
/// This is the entire function surface of the expression language. The
/// grammar only produces calls to these three names, which keeps the
/// evaluator a closed interpreter rather than a general-purpose one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `grade_parts((earned, possible), ...)`
    GradeParts,
    /// `grade_multiple(grades, out_of, use_best=.., drop_worst=..)`
    GradeMultiple,
    /// `percent(n)` -- shorthand for `n / 100`
    Percent,
}

/// Arithmetic operators supported in grade expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A call to a [`Builtin`], with positional and keyword arguments kept
/// separate. Keyword names are validated by the evaluator, not the grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub func: Builtin,
    pub args: Vec<Expr>,
    pub kwargs: Vec<(String, Expr)>,
}

/// Expression AST produced by the grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Call(Call),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Neg(Box<Expr>),
    /// The symbolic not-yet-earned score.
    Unknown,
}

impl Expr {
    #[must_use]
    pub(crate) fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Builtin::GradeParts => write!(f, "grade_parts"),
            Builtin::GradeMultiple => write!(f, "grade_multiple"),
            Builtin::Percent => write!(f, "percent"),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "*"),
            BinOp::Div => write!(f, "/"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Expr::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Expr::Call(call) => {
                write!(f, "{}(", call.func)?;
                let mut first = true;
                for arg in &call.args {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{arg}")?;
                }
                for (name, value) in &call.kwargs {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{name}={value}")?;
                }
                write!(f, ")")
            }
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
            Expr::Neg(inner) => write!(f, "(-{inner})"),
            Expr::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_builds_boxed_tree() {
        let expr = Expr::binary(BinOp::Add, Expr::Number(1.0), Expr::Number(2.0));
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinOp::Add,
                lhs: Box::new(Expr::Number(1.0)),
                rhs: Box::new(Expr::Number(2.0)),
            }
        );
    }

    #[test]
    fn display_call_with_kwargs() {
        let expr = Expr::Call(Call {
            func: Builtin::GradeMultiple,
            args: vec![
                Expr::List(vec![Expr::Number(90.0), Expr::Number(80.0)]),
                Expr::Number(100.0),
            ],
            kwargs: vec![("use_best".to_owned(), Expr::Number(1.0))],
        });
        assert_eq!(
            expr.to_string(),
            "grade_multiple([90, 80], 100, use_best=1)"
        );
    }

    #[test]
    fn display_tuple_and_arith() {
        let expr = Expr::binary(
            BinOp::Div,
            Expr::Tuple(vec![Expr::Number(1.0), Expr::Number(2.0)]),
            Expr::Neg(Box::new(Expr::Number(4.0))),
        );
        assert_eq!(expr.to_string(), "((1, 2) / (-4))");
    }

    #[test]
    fn display_unknown() {
        assert_eq!(Expr::Unknown.to_string(), "unknown");
    }
}
