use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, opt, preceded, repeat, separated, terminated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::types::{BinOp, Builtin, Call, Expr};

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn number(input: &mut &str) -> ModalResult<f64> {
    (digit1, opt(('.', digit1)))
        .take()
        .try_map(str::parse)
        .parse_next(input)
}

/// A bare percentage such as `85%` or `72.5%`. Only meaningful as the whole
/// expression; callers apply it with a full-input parse.
pub(crate) fn percent_literal(input: &mut &str) -> ModalResult<f64> {
    terminated(number, '%').parse_next(input)
}

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

// -- Symbols and calls ------------------------------------------------------
//
// Exactly four names exist in the expression environment: the three builtin
// functions and the `unknown` marker. Anything else fails the whole parse.

enum Arg {
    Positional(Expr),
    Keyword(String, Expr),
}

fn keyword_argument(input: &mut &str) -> ModalResult<(String, Expr)> {
    let name = terminated(preceded(ws, ident), (ws, '=')).parse_next(input)?;
    let value = cut_err(sum).parse_next(input)?;
    Ok((name.to_owned(), value))
}

fn argument(input: &mut &str) -> ModalResult<Arg> {
    alt((
        keyword_argument.map(|(name, value)| Arg::Keyword(name, value)),
        sum.map(Arg::Positional),
    ))
    .parse_next(input)
}

fn call_arguments(input: &mut &str) -> ModalResult<(Vec<Expr>, Vec<(String, Expr)>)> {
    let parsed: Vec<Arg> = separated(0.., argument, (ws, ',')).parse_next(input)?;
    let _ = opt((ws, ',')).parse_next(input)?;

    let mut args = Vec::new();
    let mut kwargs = Vec::new();
    for arg in parsed {
        match arg {
            Arg::Positional(expr) => {
                if !kwargs.is_empty() {
                    // positional argument after a keyword argument
                    return Err(ErrMode::from_input(input).cut());
                }
                args.push(expr);
            }
            Arg::Keyword(name, value) => kwargs.push((name, value)),
        }
    }
    Ok((args, kwargs))
}

fn symbol(input: &mut &str) -> ModalResult<Expr> {
    let name = ident.parse_next(input)?;
    let func = match name {
        "unknown" => return Ok(Expr::Unknown),
        "grade_parts" => Builtin::GradeParts,
        "grade_multiple" => Builtin::GradeMultiple,
        "percent" => Builtin::Percent,
        _ => return Err(ErrMode::from_input(input).cut()),
    };
    (ws, cut_err('(')).parse_next(input)?;
    let (args, kwargs) = call_arguments.parse_next(input)?;
    (ws, cut_err(')')).parse_next(input)?;
    Ok(Expr::Call(Call { func, args, kwargs }))
}

// -- Collections ------------------------------------------------------------

fn list(input: &mut &str) -> ModalResult<Expr> {
    '['.parse_next(input)?;
    let items: Vec<Expr> = separated(0.., sum, (ws, ',')).parse_next(input)?;
    let _ = opt((ws, ',')).parse_next(input)?;
    (ws, cut_err(']')).parse_next(input)?;
    Ok(Expr::List(items))
}

/// `(expr)` is grouping; `(a, b)`, `(a,)` and `()` are tuples.
fn group(input: &mut &str) -> ModalResult<Expr> {
    '('.parse_next(input)?;
    let mut items: Vec<Expr> = separated(0.., sum, (ws, ',')).parse_next(input)?;
    let trailing = opt((ws, ',')).parse_next(input)?.is_some();
    (ws, cut_err(')')).parse_next(input)?;

    if !trailing && items.len() == 1 {
        if let Some(expr) = items.pop() {
            return Ok(expr);
        }
    }
    Ok(Expr::Tuple(items))
}

// -- Expressions (precedence: + - < * / < unary - < primary) ----------------

fn primary(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    alt((number.map(Expr::Number), list, group, symbol))
        .context(StrContext::Expected(StrContextValue::Description(
            "expression",
        )))
        .parse_next(input)
}

fn factor(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    if opt('-').parse_next(input)?.is_some() {
        let inner = cut_err(factor).parse_next(input)?;
        Ok(Expr::Neg(Box::new(inner)))
    } else {
        primary(input)
    }
}

fn term(input: &mut &str) -> ModalResult<Expr> {
    let first = factor(input)?;
    let rest: Vec<(BinOp, Expr)> = repeat(
        0..,
        (
            preceded(ws, alt(('*'.value(BinOp::Mul), '/'.value(BinOp::Div)))),
            cut_err(factor),
        ),
    )
    .parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |lhs, (op, rhs)| Expr::binary(op, lhs, rhs)))
}

fn sum(input: &mut &str) -> ModalResult<Expr> {
    let first = term(input)?;
    let rest: Vec<(BinOp, Expr)> = repeat(
        0..,
        (
            preceded(ws, alt(('+'.value(BinOp::Add), '-'.value(BinOp::Sub)))),
            cut_err(term),
        ),
    )
    .parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |lhs, (op, rhs)| Expr::binary(op, lhs, rhs)))
}

// -- Top-level parser -------------------------------------------------------

pub(crate) fn expression(input: &mut &str) -> ModalResult<Expr> {
    terminated(sum, ws).parse_next(input)
}
