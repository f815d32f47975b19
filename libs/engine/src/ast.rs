//! Expression tree produced by the parser.
//!
//! Nodes are immutable once built and own their children. Evaluation is a
//! post-order walk that hands every combination of values to [`crate::ops`];
//! the tree itself only dispatches.

use crate::bridge;
use crate::constants::FREE_VARIABLE;
use crate::error::{DomainError, Error, Result};
use crate::functions::FunctionMetadata;
use crate::numeric::{solve, Matrix, Value};
use crate::ops;
use crate::registry::Binding;
use scical_units::Unit;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Values substituted for free variables during evaluation.
pub type Bindings = HashMap<String, Value>;

/// Prefix sign: '+' | '-'
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,  // +
    Minus, // -
}

/// Infix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,    // +
    Sub,    // -
    Mul,    // * · × or adjacency
    Div,    // / ÷
    IntDiv, // //
    Pow,    // ^ **
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::IntDiv => "//",
            BinaryOperator::Pow => "^",
        }
    }
}

/// Postfix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOperator {
    Factorial, // !
}

/// AST node of a calculator expression
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A number as typed; `text` keeps the source spelling (`0xA.8`, `¾`).
    Literal { value: Value, text: String },

    /// An identifier, resolved while parsing.
    Name { name: String, binding: Binding },

    Unary {
        operator: UnaryOperator,
        operand: Box<Node>,
    },

    Binary {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },

    Postfix {
        operator: PostfixOperator,
        operand: Box<Node>,
    },

    /// A function call; `name` is the spelling used in the input.
    Call {
        name: String,
        function: &'static FunctionMetadata,
        args: Vec<Node>,
    },

    /// `expr to target`, where `target` only holds units.
    Conversion { expr: Box<Node>, target: Box<Node> },

    Equality { lhs: Box<Node>, rhs: Box<Node> },

    /// Rectangular by construction, see [`Node::matrix`].
    Matrix { rows: Vec<Vec<Node>> },
}

impl Node {
    /// A literal whose source text is the value's canonical text.
    pub fn literal(value: Value) -> Node {
        let text = value.to_string();
        Node::Literal { value, text }
    }

    pub fn unary(operator: UnaryOperator, operand: Node) -> Node {
        Node::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(operator: BinaryOperator, left: Node, right: Node) -> Node {
        Node::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn factorial(operand: Node) -> Node {
        Node::Postfix {
            operator: PostfixOperator::Factorial,
            operand: Box::new(operand),
        }
    }

    /// A matrix literal; every row must be as long as the first.
    pub fn matrix(rows: Vec<Vec<Node>>) -> Result<Node> {
        let expected = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(Error::NonRectangularMatrix {
                row: i + 1,
                expected,
                found: row.len(),
            });
        }
        Ok(Node::Matrix { rows })
    }

    /// Source text that parses back to an equivalent tree.
    pub fn render_source(&self) -> String {
        self.to_string()
    }

    /// Whether the node can appear as an operand without parentheses.
    fn is_atomic(&self) -> bool {
        match self {
            Node::Literal { text, .. } => !text.starts_with('-') && !text.contains('/'),
            Node::Name { .. } | Node::Call { .. } | Node::Matrix { .. } | Node::Postfix { .. } => {
                true
            }
            _ => false,
        }
    }
}

struct Operand<'a>(&'a Node);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_atomic() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "({})", self.0)
        }
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, nodes: &[Node], separator: &str) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", node)?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal { text, .. } => f.write_str(text),
            Node::Name { name, .. } => f.write_str(name),
            Node::Unary { operator, operand } => {
                let sign = match operator {
                    UnaryOperator::Plus => "+",
                    UnaryOperator::Minus => "-",
                };
                write!(f, "{}{}", sign, Operand(operand))
            }
            Node::Binary {
                operator,
                left,
                right,
            } => write!(f, "{} {} {}", Operand(left), operator.symbol(), Operand(right)),
            Node::Postfix { operand, .. } => write!(f, "{}!", Operand(operand)),
            Node::Call { name, args, .. } => {
                write!(f, "{}(", name)?;
                write_separated(f, args, ", ")?;
                f.write_str(")")
            }
            Node::Conversion { expr, target } => write!(f, "{} to {}", expr, target),
            Node::Equality { lhs, rhs } => write!(f, "{} = {}", lhs, rhs),
            Node::Matrix { rows } => {
                f.write_str("[")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write_separated(f, row, ", ")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Evaluation of an expression tree to a value
pub trait Evaluate {
    fn evaluate(&self, bindings: &Bindings) -> Result<Value>;
}

impl Evaluate for Node {
    fn evaluate(&self, bindings: &Bindings) -> Result<Value> {
        match self {
            Node::Literal { value, .. } => Ok(value.clone()),
            Node::Name { name, binding } => Ok(match binding {
                Binding::Constant(value) => value.clone(),
                Binding::Variable => bindings
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| Value::symbol(name.as_str())),
                Binding::Unit(unit) => bridge::Quantity::value(Value::one(), unit.clone()),
            }),
            Node::Unary { operator, operand } => {
                let value = operand.evaluate(bindings)?;
                match operator {
                    UnaryOperator::Plus => Ok(value),
                    UnaryOperator::Minus => ops::neg(value),
                }
            }
            Node::Binary { .. } => {
                // Walk the left spine iteratively; chains like `1 + 2 + ...` nest to the left.
                let mut spine = Vec::new();
                let mut node = self;
                while let Node::Binary {
                    operator,
                    left,
                    right,
                } = node
                {
                    spine.push((*operator, right));
                    node = left;
                }
                let mut acc = node.evaluate(bindings)?;
                for (operator, right) in spine.into_iter().rev() {
                    acc = apply_binary(operator, acc, right.evaluate(bindings)?)?;
                }
                Ok(acc)
            }
            Node::Postfix { operand, .. } => ops::factorial(operand.evaluate(bindings)?),
            Node::Call { function, args, .. } => {
                let args = args
                    .iter()
                    .map(|arg| arg.evaluate(bindings))
                    .collect::<Result<Vec<_>>>()?;
                function.call(args)
            }
            Node::Conversion { expr, target } => {
                let value = expr.evaluate(bindings)?;
                let unit = target_unit(target.evaluate(bindings)?)?;
                bridge::convert(value, &unit)
            }
            Node::Equality { lhs, rhs } => {
                equality(lhs.evaluate(bindings)?, rhs.evaluate(bindings)?)
            }
            Node::Matrix { rows } => {
                let rows = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|cell| match cell.evaluate(bindings)? {
                                Value::Matrix(_) => Err(Error::Domain(DomainError::Unsupported(
                                    "matrix entries must not be matrices".into(),
                                ))),
                                value => Ok(value),
                            })
                            .collect::<Result<Vec<_>>>()
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Matrix(Matrix::from_rows(rows)?))
            }
        }
    }
}

fn apply_binary(operator: BinaryOperator, left: Value, right: Value) -> Result<Value> {
    match operator {
        BinaryOperator::Add => ops::add(left, right),
        BinaryOperator::Sub => ops::sub(left, right),
        BinaryOperator::Mul => ops::mul(left, right),
        BinaryOperator::Div => ops::div(left, right),
        BinaryOperator::IntDiv => ops::int_div(left, right),
        BinaryOperator::Pow => ops::pow(left, right),
    }
}

/// The unit a conversion target evaluated to.
fn target_unit(target: Value) -> Result<Unit> {
    match target {
        Value::Quantity(q) if q.magnitude.is_one() => Ok(q.unit),
        value if value.is_one() => Ok(Unit::one()),
        other => Err(Error::Domain(DomainError::Unsupported(format!(
            "cannot convert to '{}', which is not a unit",
            other
        )))),
    }
}

/// Decide `lhs = rhs`: a boolean when equality is decidable, otherwise the
/// solutions for the free variable or the simplified equation.
fn equality(lhs: Value, rhs: Value) -> Result<Value> {
    if let Some(equal) = ops::equals(&lhs, &rhs) {
        return Ok(Value::Boolean(equal));
    }
    // A zero side equals zero in any unit, so it needs no unit conversion.
    let difference = if bridge::is_zero(&rhs) {
        Ok(lhs)
    } else if bridge::is_zero(&lhs) {
        Ok(rhs)
    } else {
        ops::sub(lhs, rhs)
    };
    let difference = match difference {
        Ok(difference) => difference,
        Err(Error::Domain(DomainError::IncompatibleUnits { .. })) => {
            return Ok(Value::Boolean(false))
        }
        Err(err) => return Err(err),
    };
    if let Some(equal) = ops::equals(&difference, &Value::zero()) {
        return Ok(Value::Boolean(equal));
    }
    trace!(%difference, "solving equality");
    let magnitude = match difference {
        Value::Quantity(q) => q.magnitude,
        other => other,
    };
    solve::solve(&magnitude, &Value::zero(), FREE_VARIABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Node {
        Node::literal(Value::integer(n))
    }

    fn eval(node: &Node) -> Value {
        node.evaluate(&Bindings::new()).unwrap()
    }

    #[test]
    fn arithmetic_dispatch() {
        let tree = Node::binary(
            BinaryOperator::Mul,
            Node::binary(BinaryOperator::Add, int(1), int(2)),
            Node::unary(UnaryOperator::Minus, int(4)),
        );
        assert_eq!(eval(&tree), Value::integer(-12));
        assert_eq!(tree.render_source(), "(1 + 2) * (-4)");
    }

    #[test]
    fn factorial_stacks() {
        let tree = Node::factorial(Node::factorial(int(3)));
        assert_eq!(eval(&tree), Value::integer(720));
        assert_eq!(tree.render_source(), "3!!");
    }

    #[test]
    fn rational_literals_are_parenthesized() {
        let tree = Node::binary(BinaryOperator::Pow, Node::literal(Value::fraction(1, 2)), int(2));
        assert_eq!(tree.render_source(), "(1/2) ^ 2");
        assert_eq!(eval(&tree), Value::fraction(1, 4));
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let err = Node::matrix(vec![vec![int(1), int(2)], vec![int(3)]]).unwrap_err();
        assert_eq!(
            err,
            Error::NonRectangularMatrix {
                row: 2,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn variables_take_bindings() {
        let x = Node::Name {
            name: "x".into(),
            binding: Binding::Variable,
        };
        let tree = Node::binary(BinaryOperator::Pow, x, int(2));
        assert_eq!(
            eval(&tree),
            Value::Power(Box::new(Value::symbol("x")), Box::new(Value::integer(2)))
        );
        let mut bindings = Bindings::new();
        bindings.insert("x".into(), Value::integer(3));
        assert_eq!(tree.evaluate(&bindings).unwrap(), Value::integer(9));
    }

    #[test]
    fn equality_of_numbers() {
        let tree = Node::Equality {
            lhs: Box::new(Node::binary(BinaryOperator::Add, int(1), int(1))),
            rhs: Box::new(int(2)),
        };
        assert_eq!(eval(&tree), Value::Boolean(true));
    }
}
