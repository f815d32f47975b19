//! Recursive rendering of a value, one variant at a time.
//!
//! Parenthesization depends only on the [`Context`] a value is printed in:
//! the operator around it and how deep it sits inside exponents.

use super::decimal::Decimal;
use super::radix;
use super::{FormatConfig, NumeralSystem, UnitDisplay};
use crate::bridge::Quantity;
use crate::error::{Error, Result};
use crate::lexer::fraction_glyph;
use crate::numeric::{arith, Sign, Value};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};
use scical_units::UnitRegistry;
use smallvec::SmallVec;

/// The operator a value is printed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surrounding {
    None,
    Addition,
    Multiplication,
    ExponentBase,
    /// An exponent written inline after `^`.
    ExponentExponent,
    FunctionCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub exponent_depth: u32,
    pub surrounding: Surrounding,
}

impl Context {
    pub const TOP: Context = Context {
        exponent_depth: 0,
        surrounding: Surrounding::None,
    };

    fn within(self, surrounding: Surrounding) -> Context {
        Context {
            surrounding,
            ..self
        }
    }

    /// Superscripts and stacked fractions are only used outside exponents.
    fn rich(self) -> bool {
        self.exponent_depth == 0
    }
}

fn wrap(text: String) -> String {
    format!("({})", text)
}

/// A rendered number and whether it needs parentheses as an operand.
struct Number {
    text: String,
    negative: bool,
    /// Contains an operator of its own: a fraction or scientific notation.
    compound: bool,
}

pub struct Printer<'a> {
    config: &'a FormatConfig,
    units: &'a UnitRegistry,
}

impl<'a> Printer<'a> {
    pub fn new(config: &'a FormatConfig, units: &'a UnitRegistry) -> Self {
        Self { config, units }
    }

    pub fn print(&self, value: &Value, ctx: Context) -> Result<String> {
        let markup = self.config.markup;
        Ok(match value {
            Value::Integer(_) | Value::Rational(_) | Value::Float(_) => {
                let number = self.number(value, ctx)?;
                let wrap_it = match ctx.surrounding {
                    Surrounding::ExponentBase => number.negative || number.compound,
                    Surrounding::ExponentExponent | Surrounding::Multiplication => {
                        number.compound
                    }
                    _ => false,
                };
                if wrap_it {
                    wrap(number.text)
                } else {
                    number.text
                }
            }
            Value::Constant(c) => c.symbol().to_string(),
            Value::ImaginaryUnit => "i".to_string(),
            Value::Infinity(Sign::Positive) => "∞".to_string(),
            Value::Infinity(Sign::Negative) if ctx.surrounding == Surrounding::ExponentBase => {
                "(-∞)".to_string()
            }
            Value::Infinity(Sign::Negative) => "-∞".to_string(),
            Value::ComplexInfinity => "z∞".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Symbol(name) => markup.escape(name).into_owned(),
            Value::Sum(terms) => self.sum(terms, ctx)?,
            Value::Product(factors) => self.product(factors, ctx)?,
            Value::Power(base, exp) => self.power(base, exp, ctx)?,
            Value::Apply(name, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.print(arg, ctx.within(Surrounding::FunctionCall)))
                    .collect::<Result<Vec<_>>>()?;
                format!("{}({})", name, args.join(", "))
            }
            Value::Quantity(q) => self.quantity(q, ctx)?,
            Value::Matrix(m) => {
                let mut rows = Vec::with_capacity(m.rows());
                for i in 0..m.rows() {
                    let cells = m
                        .row(i)
                        .iter()
                        .map(|cell| self.print(cell, ctx.within(Surrounding::FunctionCall)))
                        .collect::<Result<Vec<_>>>()?;
                    rows.push(cells.join(", "));
                }
                format!("[{}]", rows.join("; "))
            }
            Value::Solutions(solutions) => {
                let variable = markup.escape(&solutions.variable);
                let lines = solutions
                    .values
                    .iter()
                    .map(|v| Ok(format!("{} = {}", variable, self.print(v, Context::TOP)?)))
                    .collect::<Result<Vec<_>>>()?;
                lines.join(markup.line_break())
            }
            Value::UnsolvedEquality(lhs, rhs) => format!(
                "{} = {}",
                self.print(lhs, Context::TOP)?,
                self.print(rhs, Context::TOP)?
            ),
        })
    }

    fn number(&self, value: &Value, ctx: Context) -> Result<Number> {
        let system = self.config.numeral_system;
        match value {
            Value::Integer(n) => Ok(Number {
                text: self.integer(n)?,
                negative: n.is_negative(),
                compound: false,
            }),
            Value::Rational(r) => match system.base() {
                Some(base) => Ok(Number {
                    text: radix::fraction(r, base, self.config.digits),
                    negative: r.is_negative(),
                    compound: false,
                }),
                None if system == NumeralSystem::Roman => Err(not_integral(value)),
                None => Ok(self.fraction(r, ctx)),
            },
            Value::Float(f) => {
                let negative = f.value().is_negative();
                match system {
                    NumeralSystem::Decimal => {
                        let digits = self.config.digits.min(f.precision());
                        let decimal = Decimal::new(f.value(), digits);
                        Ok(Number {
                            text: self.config.markup.decimal(&decimal, ctx.rich()),
                            negative,
                            compound: decimal.is_scientific(),
                        })
                    }
                    NumeralSystem::Roman if f.value().is_integer() => Ok(Number {
                        text: radix::to_roman(&f.value().to_integer())?,
                        negative,
                        compound: false,
                    }),
                    NumeralSystem::Roman => Err(not_integral(value)),
                    other => Ok(Number {
                        text: radix::fraction(
                            f.value(),
                            other.base().unwrap_or(10),
                            self.config.digits,
                        ),
                        negative,
                        compound: false,
                    }),
                }
            }
            other => Err(Error::Format(format!("{} is not a number", other.kind()))),
        }
    }

    fn integer(&self, n: &BigInt) -> Result<String> {
        match self.config.numeral_system {
            NumeralSystem::Decimal => Ok(n.to_string()),
            NumeralSystem::Roman => radix::to_roman(n),
            other => Ok(radix::integer(n, other.base().unwrap_or(10))),
        }
    }

    /// A decimal fraction: a glyph such as `¾` when one exists.
    fn fraction(&self, r: &BigRational, ctx: Context) -> Number {
        let negative = r.is_negative();
        let sign = if negative { "-" } else { "" };
        let numer = r.numer().abs();
        let glyph = match (numer.to_i64(), r.denom().to_i64()) {
            (Some(p), Some(q)) => fraction_glyph(p, q),
            _ => None,
        };
        match glyph {
            Some(glyph) => Number {
                text: format!("{}{}", sign, glyph),
                negative,
                compound: false,
            },
            None => Number {
                text: format!(
                    "{}{}",
                    sign,
                    self.config.markup.fraction(
                        &numer.to_string(),
                        &r.denom().to_string(),
                        ctx.rich()
                    )
                ),
                negative,
                compound: true,
            },
        }
    }

    fn sum(&self, terms: &[Value], ctx: Context) -> Result<String> {
        let inner = ctx.within(Surrounding::Addition);
        let mut out = String::new();
        for (i, term) in terms.iter().enumerate() {
            if i == 0 {
                out.push_str(&self.print(term, inner)?);
            } else if let Some(positive) = negated(term) {
                out.push_str(" - ");
                out.push_str(&self.print(&positive, inner)?);
            } else {
                out.push_str(" + ");
                out.push_str(&self.print(term, inner)?);
            }
        }
        Ok(match ctx.surrounding {
            Surrounding::Multiplication
            | Surrounding::ExponentBase
            | Surrounding::ExponentExponent => wrap(out),
            _ => out,
        })
    }

    /// Factors with negative exponents go below a fraction bar.
    fn product(&self, factors: &[Value], ctx: Context) -> Result<String> {
        let inner = ctx.within(Surrounding::Multiplication);
        let mut numer: SmallVec<[String; 4]> = SmallVec::new();
        let mut denom: SmallVec<[String; 4]> = SmallVec::new();
        let mut negative = false;

        for (i, factor) in factors.iter().enumerate() {
            match factor {
                Value::Integer(n) if i == 0 => {
                    negative = n.is_negative();
                    if n.abs() != BigInt::from(1) {
                        numer.push(self.integer(&n.abs())?);
                    }
                }
                Value::Rational(r)
                    if i == 0 && self.config.numeral_system == NumeralSystem::Decimal =>
                {
                    negative = r.is_negative();
                    let p = r.numer().abs();
                    if p != BigInt::from(1) {
                        numer.push(p.to_string());
                    }
                    denom.push(r.denom().to_string());
                }
                Value::Rational(_) | Value::Float(_) if i == 0 && factor.is_negative_number() => {
                    negative = true;
                    let positive = arith::neg(factor.clone())?;
                    numer.push(self.print(&positive, inner)?);
                }
                Value::Power(base, exp) if exp.is_negative_number() => {
                    let exp = arith::neg((**exp).clone())?;
                    let text = if exp.is_one() {
                        self.print(base, inner)?
                    } else {
                        self.power(base, &exp, inner)?
                    };
                    denom.push(text);
                }
                other => numer.push(self.print(other, inner)?),
            }
        }

        let numer = if numer.is_empty() {
            "1".to_string()
        } else {
            numer.join("·")
        };
        let body = match denom.len() {
            0 => numer,
            1 => format!("{}/{}", numer, denom[0]),
            _ => format!("{}/({})", numer, denom.join("·")),
        };
        let text = if negative { format!("-{}", body) } else { body };
        Ok(match ctx.surrounding {
            Surrounding::ExponentBase | Surrounding::ExponentExponent => wrap(text),
            Surrounding::Multiplication if negative => wrap(text),
            _ => text,
        })
    }

    fn power(&self, base: &Value, exp: &Value, ctx: Context) -> Result<String> {
        if *exp == Value::fraction(1, 2) {
            let radicand = self.print(base, ctx.within(Surrounding::ExponentBase))?;
            return Ok(format!("√{}", radicand));
        }
        if exp.is_negative_number() {
            let reciprocal = Value::Product(vec![Value::Power(
                Box::new(base.clone()),
                Box::new(exp.clone()),
            )]);
            return self.print(&reciprocal, ctx);
        }

        let base_text = self.print(base, ctx.within(Surrounding::ExponentBase))?;
        let depth = ctx.exponent_depth + 1;
        let superscript = self.config.markup.is_rich() && depth <= 1;
        let exp_ctx = Context {
            exponent_depth: depth,
            surrounding: if superscript {
                Surrounding::None
            } else {
                Surrounding::ExponentExponent
            },
        };
        let exp_text = self.print(exp, exp_ctx)?;
        let text = self.config.markup.power(&base_text, &exp_text, superscript);
        Ok(if ctx.surrounding == Surrounding::ExponentBase {
            wrap(text)
        } else {
            text
        })
    }

    fn quantity(&self, q: &Quantity, ctx: Context) -> Result<String> {
        let q = match self.config.unit_display {
            UnitDisplay::AsIs => q.clone(),
            UnitDisplay::ToBase => q.rescale(self.units.to_base(&q.unit)?)?,
            UnitDisplay::ToBest => q.rescale(self.units.to_best(&q.unit)?)?,
        };
        if q.unit.is_one() {
            return self.print(&q.magnitude, ctx);
        }

        let reciprocal = q.unit.numerator().next().is_none();
        let unit = if reciprocal && !q.magnitude.is_one() {
            self.config.markup.reciprocal_unit(&q.unit, ctx.rich())
        } else if ctx.rich() {
            self.config.markup.unit(&q.unit)
        } else {
            q.unit.to_string()
        };
        let text = if q.magnitude.is_one() {
            unit
        } else {
            let magnitude = self.print(&q.magnitude, ctx.within(Surrounding::Multiplication))?;
            format!("{} {}", magnitude, unit)
        };
        Ok(match ctx.surrounding {
            Surrounding::ExponentBase | Surrounding::Multiplication => wrap(text),
            _ => text,
        })
    }
}

fn not_integral(value: &Value) -> Error {
    Error::Format(format!(
        "roman numerals are only supported for integers, got {}",
        value
    ))
}

/// The positive counterpart of a term that prints with a leading minus.
fn negated(term: &Value) -> Option<Value> {
    match term {
        Value::Infinity(Sign::Negative) => Some(Value::Infinity(Sign::Positive)),
        Value::Product(factors) => {
            let (first, rest) = factors.split_first()?;
            if !first.is_negative_number() {
                return None;
            }
            let coefficient = arith::neg(first.clone()).ok()?;
            let mut positive: Vec<Value> = Vec::with_capacity(factors.len());
            if !coefficient.is_one() {
                positive.push(coefficient);
            }
            positive.extend(rest.iter().cloned());
            Some(match positive.len() {
                1 => positive.pop()?,
                _ => Value::Product(positive),
            })
        }
        other if other.is_negative_number() => arith::neg(other.clone()).ok(),
        _ => None,
    }
}
