use crate::parser::error::{ParseError, convert_pest_error};
use crate::parser::parsed_expr::{Expr, Literal, ParsedAnnotation, PathStep};
use crate::parser::syntax::{BinaryOp, BoolOp, ComparisonOp, UnaryOp};
use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        .op(Op::infix(Rule::or, Assoc::Left))            // `||`
        .op(Op::infix(Rule::and, Assoc::Left))           // `&&`

        // Comparisons.
        .op(
            Op::infix(Rule::eq, Assoc::Left) |
            Op::infix(Rule::ne, Assoc::Left) |
            Op::infix(Rule::lt, Assoc::Left) |
            Op::infix(Rule::le, Assoc::Left) |
            Op::infix(Rule::gt, Assoc::Left) |
            Op::infix(Rule::ge, Assoc::Left)
        )                                               // `==`, `!=`, `<`, `<=`, `>`, `>=`

        // Arithmetic operators.
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                               // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left) |
            Op::infix(Rule::rem, Assoc::Left)
        )                                               // `*`, `/`, `%`
        .op(Op::prefix(Rule::neg) | Op::prefix(Rule::not)) // `-`, `!`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

type PestError = pest::error::Error<Rule>;

fn custom_error(message: impl Into<String>, span: pest::Span<'_>) -> PestError {
    pest::error::Error::new_from_span(
        pest::error::ErrorVariant::CustomError {
            message: message.into(),
        },
        span,
    )
}

fn next_inner<'i>(pairs: &mut pest::iterators::Pairs<'i, Rule>, span: pest::Span<'i>) -> Result<Pair<'i, Rule>, PestError> {
    pairs
        .next()
        .ok_or_else(|| custom_error("missing expected pair in rule", span))
}

pub fn parse_expr(pair: Pair<Rule>) -> Result<Expr, PestError> {
    match pair.as_rule() {
        Rule::expression => PRATT_PARSER
            .map_primary(parse_expr)
            .map_prefix(|op, rhs| {
                let op = match op.as_rule() {
                    Rule::neg => UnaryOp::Neg,
                    Rule::not => UnaryOp::Not,
                    _ => unreachable!("Unknown prefix operator: {:?}", op.as_rule()),
                };
                // Fold negative number literals so `-5` is a literal, not an operation.
                match (op, rhs?) {
                    (UnaryOp::Neg, Expr::Literal(Literal::Int(value))) => {
                        Ok(Expr::Literal(Literal::Int(value.wrapping_neg())))
                    }
                    (UnaryOp::Neg, Expr::Literal(Literal::Float(value))) => {
                        Ok(Expr::Literal(Literal::Float(-value)))
                    }
                    (op, expr) => Ok(Expr::Unary {
                        op,
                        expr: Box::new(expr),
                    }),
                }
            })
            .map_infix(|lhs, op, rhs| {
                let left = Box::new(lhs?);
                let right = Box::new(rhs?);
                Ok(match op.as_rule() {
                    Rule::add => Expr::Binary { op: BinaryOp::Add, left, right },
                    Rule::sub => Expr::Binary { op: BinaryOp::Sub, left, right },
                    Rule::mul => Expr::Binary { op: BinaryOp::Mul, left, right },
                    Rule::div => Expr::Binary { op: BinaryOp::Div, left, right },
                    Rule::rem => Expr::Binary { op: BinaryOp::Rem, left, right },
                    Rule::eq => Expr::Comparison { op: ComparisonOp::Eq, left, right },
                    Rule::ne => Expr::Comparison { op: ComparisonOp::Neq, left, right },
                    Rule::lt => Expr::Comparison { op: ComparisonOp::Lt, left, right },
                    Rule::le => Expr::Comparison { op: ComparisonOp::Le, left, right },
                    Rule::gt => Expr::Comparison { op: ComparisonOp::Gt, left, right },
                    Rule::ge => Expr::Comparison { op: ComparisonOp::Ge, left, right },
                    Rule::and => Expr::Boolean { op: BoolOp::And, left, right },
                    Rule::or => Expr::Boolean { op: BoolOp::Or, left, right },
                    _ => unreachable!("Unknown binary operator: {:?}", op.as_rule()),
                })
            })
            .parse(pair.into_inner()),

        Rule::grouped => {
            let span = pair.as_span();
            parse_expr(next_inner(&mut pair.into_inner(), span)?)
        }

        Rule::current => Ok(Expr::Current),

        Rule::sibling => {
            let span = pair.as_span();
            let path = next_inner(&mut pair.into_inner(), span)?;
            parse_field_path(path).map(Expr::Sibling)
        }

        Rule::call => {
            let span = pair.as_span();
            let mut inner = pair.into_inner();
            let name = next_inner(&mut inner, span)?.as_str().to_string();
            let args = inner.map(parse_expr).collect::<Result<_, _>>()?;
            Ok(Expr::Call { name, args })
        }

        Rule::nil => Ok(Expr::Literal(Literal::Nil)),

        Rule::boolean => match pair.as_str() {
            "true" => Ok(Expr::Literal(Literal::Bool(true))),
            "false" => Ok(Expr::Literal(Literal::Bool(false))),
            _ => Err(custom_error("invalid boolean literal", pair.as_span())),
        },

        Rule::integer => {
            let text = pair.as_str();
            match text.parse::<i64>() {
                Ok(value) => Ok(Expr::Literal(Literal::Int(value))),
                // Too large for i64: keep it as a float like other numeric kinds would.
                Err(_) => text
                    .parse::<f64>()
                    .map(|value| Expr::Literal(Literal::Float(value)))
                    .map_err(|_| {
                        custom_error(format!("invalid number literal '{}'", text), pair.as_span())
                    }),
            }
        }

        Rule::float => {
            let text = pair.as_str();
            text.parse()
                .map(|value| Expr::Literal(Literal::Float(value)))
                .map_err(|_| custom_error(format!("invalid number literal '{}'", text), pair.as_span()))
        }

        Rule::string => {
            let span = pair.as_span();
            let body = next_inner(&mut pair.into_inner(), span)?;
            Ok(Expr::Literal(Literal::Str(unescape(body.as_str()))))
        }

        _ => Err(custom_error(
            format!("Unhandled rule: {:?}", pair.as_rule()),
            pair.as_span(),
        )),
    }
}

fn parse_field_path(pair: Pair<Rule>) -> Result<Vec<PathStep>, PestError> {
    let mut steps = Vec::new();
    for step in pair.into_inner() {
        match step.as_rule() {
            Rule::ident => steps.push(PathStep::Field(step.as_str().to_string())),
            Rule::field_access | Rule::index_access => {
                let rule = step.as_rule();
                let span = step.as_span();
                let inner = next_inner(&mut step.into_inner(), span)?;
                if rule == Rule::field_access {
                    steps.push(PathStep::Field(inner.as_str().to_string()));
                } else {
                    let index = inner
                        .as_str()
                        .parse()
                        .map_err(|_| custom_error("invalid index", inner.as_span()))?;
                    steps.push(PathStep::Index(index));
                }
            }
            _ => return Err(custom_error("unexpected token in field path", step.as_span())),
        }
    }
    Ok(steps)
}

/// Resolve backslash escapes in a quoted string body. Unknown escapes are
/// kept verbatim so that regular expressions like `'^\w+$'` survive.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(quote @ ('\'' | '"' | '\\')) => out.push(quote),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn parse_pairs(source: &str) -> Result<ParsedAnnotation, PestError> {
    let mut pairs = ExpressionParser::parse(Rule::main, source)?;
    let main = pairs.next().ok_or_else(|| {
        let start = pest::Position::from_start(source);
        custom_error("missing expected pair in rule", start.span(&start))
    })?;
    let span = main.as_span();
    let body = next_inner(&mut main.into_inner(), span)?;
    match body.as_rule() {
        Rule::extended => {
            let span = body.as_span();
            let mut inner = body.into_inner();
            let expr = parse_expr(next_inner(&mut inner, span)?)?;
            let message = parse_expr(next_inner(&mut inner, span)?)?;
            Ok(ParsedAnnotation {
                expr,
                message: Some(message),
            })
        }
        _ => Ok(ParsedAnnotation {
            expr: parse_expr(body)?,
            message: None,
        }),
    }
}

/// Parse one annotation, plain or in the `@:<expr>;msg:<expr>` form.
pub fn parse(source: &str) -> Result<ParsedAnnotation, ParseError> {
    parse_pairs(source).map_err(|err| convert_pest_error(err, source))
}
