use winnow::prelude::*;

use crate::parse::{grammar, ParseError};
use crate::types::{BinOp, Builtin, Call, Expr, GradeValue};

/// Evaluate a single grade expression.
///
/// A bare percentage (`85%`, `72.5%`) is handled up front and never reaches
/// the general grammar. Everything else is parsed into the allow-listed AST
/// and interpreted; any failure along the way is reported as one
/// [`ParseError::InvalidExpression`] carrying the original text.
///
/// # Errors
///
/// Returns [`ParseError::InvalidExpression`] if the expression is not valid
/// under the restricted grammar, or evaluates to something that is neither a
/// number nor `unknown`.
pub fn evaluate_expression(expr: &str) -> Result<GradeValue, ParseError> {
    let src = expr.trim();

    if let Ok(percent) = grammar::percent_literal.parse(src) {
        return Ok(GradeValue::Known(percent / 100.0));
    }

    let ast = grammar::expression
        .parse(src)
        .map_err(|_| ParseError::invalid_expression(src))?;

    match eval(&ast) {
        Ok(Evaluated::Num(n)) => Ok(GradeValue::Known(n)),
        Ok(Evaluated::Unknown) => Ok(GradeValue::Unknown),
        Ok(_) | Err(EvalFailure) => Err(ParseError::invalid_expression(src)),
    }
}

/// Intermediate result of walking the AST. Lists and tuples only exist as
/// builtin arguments; a whole expression must come out as `Num` or `Unknown`.
#[derive(Debug, Clone, PartialEq)]
enum Evaluated {
    Num(f64),
    List(Vec<Evaluated>),
    Tuple(Vec<Evaluated>),
    Unknown,
}

/// Marker for any evaluation failure; the caller folds it into
/// `InvalidExpression` with the original source text.
struct EvalFailure;

fn eval(expr: &Expr) -> Result<Evaluated, EvalFailure> {
    match expr {
        Expr::Number(n) => Ok(Evaluated::Num(*n)),
        Expr::Unknown => Ok(Evaluated::Unknown),
        Expr::List(items) => Ok(Evaluated::List(eval_all(items)?)),
        Expr::Tuple(items) => Ok(Evaluated::Tuple(eval_all(items)?)),
        Expr::Neg(inner) => match eval(inner)? {
            Evaluated::Num(n) => Ok(Evaluated::Num(-n)),
            _ => Err(EvalFailure),
        },
        Expr::Binary { op, lhs, rhs } => {
            // `unknown` cannot be combined arithmetically
            let (Evaluated::Num(a), Evaluated::Num(b)) = (eval(lhs)?, eval(rhs)?) else {
                return Err(EvalFailure);
            };
            Ok(Evaluated::Num(match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                BinOp::Div => a / b,
            }))
        }
        Expr::Call(call) => eval_call(call),
    }
}

fn eval_all(items: &[Expr]) -> Result<Vec<Evaluated>, EvalFailure> {
    items.iter().map(eval).collect()
}

fn eval_call(call: &Call) -> Result<Evaluated, EvalFailure> {
    let args = eval_all(&call.args)?;
    let kwargs: Vec<(&str, Evaluated)> = call
        .kwargs
        .iter()
        .map(|(name, value)| Ok((name.as_str(), eval(value)?)))
        .collect::<Result<_, EvalFailure>>()?;

    match call.func {
        Builtin::GradeParts => grade_parts(&args, &kwargs),
        Builtin::GradeMultiple => grade_multiple(&args, &kwargs),
        Builtin::Percent => percent(&args, &kwargs),
    }
}

/// `grade_parts((earned, possible), ...)` -> total earned / total possible.
/// Division by zero is not guarded; an empty call or zero denominator
/// propagates as IEEE-754 NaN/infinity.
fn grade_parts(args: &[Evaluated], kwargs: &[(&str, Evaluated)]) -> Result<Evaluated, EvalFailure> {
    if !kwargs.is_empty() {
        return Err(EvalFailure);
    }

    let mut earned = 0.0;
    let mut possible = 0.0;
    for arg in args {
        let Evaluated::Tuple(pair) = arg else {
            return Err(EvalFailure);
        };
        let [Evaluated::Num(e), Evaluated::Num(p)] = pair.as_slice() else {
            return Err(EvalFailure);
        };
        earned += *e;
        possible += *p;
    }
    Ok(Evaluated::Num(earned / possible))
}

/// `grade_multiple(grades, out_of, use_best=.., drop_worst=..)`.
///
/// Grades are sorted descending; `use_best` keeps the head of the sorted
/// list, then `drop_worst` removes from the tail of what is left. Both may
/// also be passed positionally. An empty kept list scores `0.0`.
#[allow(clippy::cast_precision_loss)]
fn grade_multiple(
    args: &[Evaluated],
    kwargs: &[(&str, Evaluated)],
) -> Result<Evaluated, EvalFailure> {
    if args.len() < 2 || args.len() > 4 {
        return Err(EvalFailure);
    }

    let Evaluated::List(items) = &args[0] else {
        return Err(EvalFailure);
    };
    let mut grades = Vec::with_capacity(items.len());
    for item in items {
        let Evaluated::Num(n) = item else {
            return Err(EvalFailure);
        };
        grades.push(*n);
    }
    let Evaluated::Num(out_of) = &args[1] else {
        return Err(EvalFailure);
    };

    let mut use_best = args.get(2).map(as_count).transpose()?;
    let mut drop_worst = args.get(3).map(as_count).transpose()?;
    for (name, value) in kwargs {
        match *name {
            "use_best" if use_best.is_none() => use_best = Some(as_count(value)?),
            "drop_worst" if drop_worst.is_none() => drop_worst = Some(as_count(value)?),
            _ => return Err(EvalFailure),
        }
    }

    grades.sort_by(|a, b| b.total_cmp(a));
    if let Some(best) = use_best {
        grades.truncate(best);
    }
    if let Some(worst) = drop_worst {
        grades.truncate(grades.len().saturating_sub(worst));
    }

    if grades.is_empty() {
        return Ok(Evaluated::Num(0.0));
    }
    let total: f64 = grades.iter().sum();
    Ok(Evaluated::Num(total / (*out_of * grades.len() as f64)))
}

/// `percent(n)` -> `n / 100`.
fn percent(args: &[Evaluated], kwargs: &[(&str, Evaluated)]) -> Result<Evaluated, EvalFailure> {
    if !kwargs.is_empty() {
        return Err(EvalFailure);
    }
    let [Evaluated::Num(n)] = args else {
        return Err(EvalFailure);
    };
    Ok(Evaluated::Num(n / 100.0))
}

/// A count argument must be a non-negative whole number.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_count(value: &Evaluated) -> Result<usize, EvalFailure> {
    match value {
        Evaluated::Num(n) if *n >= 0.0 && n.fract() == 0.0 => Ok(*n as usize),
        _ => Err(EvalFailure),
    }
}
