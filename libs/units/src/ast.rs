/// A parsed unit definition such as `kg.m.s-2` or `J/(mol.K)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitExpr {
    pub numerator: Vec<(Term, i32)>,
    pub denominator: Vec<(Term, i32)>,
}

impl UnitExpr {
    pub fn one() -> Self {
        Self {
            numerator: vec![],
            denominator: vec![],
        }
    }

    pub fn is_one(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Atom(Atom),
    Group(Box<UnitExpr>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Atom {
    /// A unit symbol, possibly prefixed (e.g. `km`, `Ω`, `mol`).
    Symbol(String),
    /// A positive integer scalar (e.g. `10` in `10.m`).
    Integer(u64),
}
