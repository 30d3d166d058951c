//! Terms, literals, and clauses for first-order logic programs, plus
//! the lexical grammar their names obey and a small text parser. This
//! crate is the data model only: canonicalization of symbols lives in
//! the interning context, and execution lives behind the engine
//! adapter contract.

mod name;
pub mod parse;
mod symbol;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops;
use std::vec;

pub use name::{classify, is_constant_name, is_variable_name, NameClass};
pub use symbol::{
    Constant, EngineHandle, Float, Functor, Predicate, Type, Variable, LIST_FUNCTOR, NUMBER,
    PAIR_FUNCTOR, THING,
};

/// Map terms to their replacements. Applying a substitution never
/// mutates shared structure; it builds new terms.
pub type Substitution = BTreeMap<Term, Term>;

/// An element that may appear as a predicate or functor argument:
/// an interpreted symbol, a compound, or a bare numeric literal
/// passed through unconverted.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Term {
    Constant(Constant),
    Variable(Variable),
    Structure(Structure),
    Int(i64),
    Float(Float),
}

impl Term {
    pub fn is_ground(&self) -> bool {
        match self {
            Self::Constant(_) | Self::Int(_) | Self::Float(_) => true,
            Self::Variable(_) => false,
            Self::Structure(s) => s.is_ground(),
        }
    }

    /// The variables occurring in this term, outermost first.
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Self::Constant(_) | Self::Int(_) | Self::Float(_) => Vec::new(),
            Self::Variable(v) => vec![v.clone()],
            Self::Structure(s) => s.variables(),
        }
    }

    /// Replace this term wholesale if the substitution maps it,
    /// otherwise rebuild compounds with substituted arguments.
    pub fn substitute(&self, map: &Substitution) -> Term {
        if let Some(t) = map.get(self) {
            return t.clone();
        }
        match self {
            Self::Structure(s) => Self::Structure(s.substitute(map)),
            _ => self.clone(),
        }
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Self::Constant(c)
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Self::Variable(v)
    }
}

impl From<Structure> for Term {
    fn from(s: Structure) -> Self {
        Self::Structure(s)
    }
}

impl From<i64> for Term {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Term {
    fn from(f: f64) -> Self {
        Self::Float(Float::new(f))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => c.fmt(f),
            Self::Variable(v) => v.fmt(f),
            Self::Structure(s) => s.fmt(f),
            Self::Int(i) => i.fmt(f),
            Self::Float(x) => x.fmt(f),
        }
    }
}

/// A functor applied to an ordered argument list. Lists and explicit
/// head/tail pairs are structures over the two reserved functors.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Structure {
    functor: Functor,
    arguments: Vec<Term>,
}

impl Structure {
    pub fn new(functor: Functor, arguments: impl IntoIterator<Item = Term>) -> Self {
        Self {
            functor,
            arguments: arguments.into_iter().collect(),
        }
    }

    pub fn functor(&self) -> &Functor {
        &self.functor
    }

    pub fn name(&self) -> &str {
        self.functor.name()
    }

    pub fn arguments(&self) -> &[Term] {
        &self.arguments
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// A finite sequence with an implicit empty tail.
    pub fn is_list(&self) -> bool {
        self.functor.name() == LIST_FUNCTOR
    }

    /// An explicit two-element cons cell.
    pub fn is_pair(&self) -> bool {
        self.functor.name() == PAIR_FUNCTOR && self.arguments.len() == 2
    }

    pub fn is_ground(&self) -> bool {
        self.arguments.iter().all(Term::is_ground)
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.arguments.iter().flat_map(Term::variables).collect()
    }

    pub fn substitute(&self, map: &Substitution) -> Structure {
        Self {
            functor: self.functor.clone(),
            arguments: self.arguments.iter().map(|t| t.substitute(map)).collect(),
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = |sep: &str| {
            self.arguments
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(sep)
        };
        if self.is_list() {
            f.write_fmt(format_args!("[{}]", args(",")))
        } else if self.is_pair() {
            f.write_fmt(format_args!(
                "[{} | {}]",
                self.arguments[0], self.arguments[1]
            ))
        } else {
            f.write_fmt(format_args!("{}({})", self.functor, args(",")))
        }
    }
}

/// A predicate applied to an ordered argument list.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Atom {
    predicate: Predicate,
    arguments: Vec<Term>,
}

impl Atom {
    pub fn new(predicate: Predicate, arguments: impl IntoIterator<Item = Term>) -> Self {
        Self {
            predicate,
            arguments: arguments.into_iter().collect(),
        }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn arguments(&self) -> &[Term] {
        &self.arguments
    }

    /// Ground iff no argument contains a variable.
    pub fn is_ground(&self) -> bool {
        self.arguments.iter().all(Term::is_ground)
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.arguments.iter().flat_map(Term::variables).collect()
    }

    pub fn substitute(&self, map: &Substitution) -> Atom {
        Self {
            predicate: self.predicate.clone(),
            arguments: self.arguments.iter().map(|t| t.substitute(map)).collect(),
        }
    }
}

/// A nullary predicate used as a proposition.
impl From<Predicate> for Atom {
    fn from(predicate: Predicate) -> Self {
        Self::new(predicate, [])
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arguments.is_empty() {
            self.predicate.fmt(f)
        } else {
            f.write_fmt(format_args!(
                "{}({})",
                self.predicate,
                self.arguments
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            ))
        }
    }
}

/// An atom or its negation as failure. Negation wraps exactly one
/// atom; anything else is unrepresentable.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Literal {
    Atom(Atom),
    Not(Atom),
}

impl Literal {
    pub fn atom(&self) -> &Atom {
        match self {
            Self::Atom(a) | Self::Not(a) => a,
        }
    }

    pub fn predicate(&self) -> &Predicate {
        self.atom().predicate()
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Atom(_))
    }

    pub fn is_negative(&self) -> bool {
        !self.is_positive()
    }

    pub fn negate(self) -> Self {
        match self {
            Self::Atom(a) => Self::Not(a),
            Self::Not(a) => Self::Atom(a),
        }
    }

    pub fn is_ground(&self) -> bool {
        self.atom().is_ground()
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.atom().variables()
    }

    pub fn substitute(&self, map: &Substitution) -> Literal {
        match self {
            Self::Atom(a) => Self::Atom(a.substitute(map)),
            Self::Not(a) => Self::Not(a.substitute(map)),
        }
    }
}

impl From<Atom> for Literal {
    fn from(a: Atom) -> Self {
        Self::Atom(a)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(a) => a.fmt(f),
            Self::Not(a) => f.write_fmt(format_args!("\\+ {a}")),
        }
    }
}

/// An ordered conjunction of literals. All combinators build new
/// bodies; a body shared between clauses is never mutated through one
/// of them.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Body(Vec<Literal>);

impl Body {
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self(literals.into_iter().collect())
    }

    pub fn literals(&self) -> &[Literal] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn and_also(mut self, literals: impl IntoIterator<Item = Literal>) -> Self {
        self.0.extend(literals);
        self
    }

    /// The predicates applied by the literals.
    pub fn predicates(&self) -> BTreeSet<Predicate> {
        self.iter().map(|l| l.predicate().clone()).collect()
    }

    /// The variables of the conjunction, in first-occurrence order
    /// across the literal sequence.
    pub fn variables(&self) -> Vec<Variable> {
        let mut ordered = Vec::new();
        let mut seen = BTreeSet::new();
        for literal in self.iter() {
            for v in literal.variables() {
                if seen.insert(v.clone()) {
                    ordered.push(v);
                }
            }
        }
        ordered
    }

    pub fn substitute(&self, map: &Substitution) -> Body {
        Self(self.iter().map(|l| l.substitute(map)).collect())
    }

    /// Rename every application of `old` to `new`, preserving argument
    /// order. The two predicates must agree on arity.
    pub fn substitute_predicate(&self, old: &Predicate, new: &Predicate) -> Body {
        assert_eq!(old.arity(), new.arity());
        Self(
            self.iter()
                .map(|l| {
                    if l.predicate() == old {
                        let a = Atom::new(new.clone(), l.atom().arguments().to_vec());
                        match l {
                            Literal::Atom(_) => Literal::Atom(a),
                            Literal::Not(_) => Literal::Not(a),
                        }
                    } else {
                        l.clone()
                    }
                })
                .collect(),
        )
    }
}

impl FromIterator<Literal> for Body {
    fn from_iter<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        Self::new(literals)
    }
}

impl IntoIterator for Body {
    type Item = Literal;
    type IntoIter = vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("true")
        } else {
            f.write_str(
                &self
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        }
    }
}

impl ops::BitAnd for Atom {
    type Output = Body;

    fn bitand(self, rhs: Self) -> Body {
        Body::new([Literal::Atom(self), Literal::Atom(rhs)])
    }
}

impl ops::BitAnd<Literal> for Atom {
    type Output = Body;

    fn bitand(self, rhs: Literal) -> Body {
        Body::new([Literal::Atom(self), rhs])
    }
}

impl ops::BitAnd<Atom> for Body {
    type Output = Body;

    fn bitand(self, rhs: Atom) -> Body {
        self.and_also([Literal::Atom(rhs)])
    }
}

impl ops::BitAnd<Literal> for Body {
    type Output = Body;

    fn bitand(self, rhs: Literal) -> Body {
        self.and_also([rhs])
    }
}

impl ops::BitAnd for Body {
    type Output = Body;

    fn bitand(self, rhs: Body) -> Body {
        self.and_also(rhs)
    }
}

/// A definite clause: one head atom and a conjunctive body. A fact is
/// a clause with an empty body.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Clause {
    head: Atom,
    body: Body,
}

impl Clause {
    pub fn new(head: Atom, body: Body) -> Self {
        Self { head, body }
    }

    pub fn fact(head: Atom) -> Self {
        Self::new(head, Body::default())
    }

    pub fn head(&self) -> &Atom {
        &self.head
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The body length.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn literals(&self) -> &[Literal] {
        self.body.literals()
    }

    /// Only the body literals applying one of the given predicates.
    pub fn literals_with(&self, predicates: &BTreeSet<Predicate>) -> Vec<&Literal> {
        self.body
            .iter()
            .filter(|l| predicates.contains(l.predicate()))
            .collect()
    }

    /// The predicates applied in the body (the head's is not included).
    pub fn body_predicates(&self) -> BTreeSet<Predicate> {
        self.body.predicates()
    }

    /// Recursive iff the head predicate occurs among the body's.
    pub fn is_recursive(&self) -> bool {
        self.body_predicates().contains(self.head.predicate())
    }

    /// Head variables first, then body variables in first-occurrence
    /// order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut ordered = self.head_variables();
        let mut seen: BTreeSet<Variable> = ordered.iter().cloned().collect();
        for v in self.body_variables() {
            if seen.insert(v.clone()) {
                ordered.push(v);
            }
        }
        ordered
    }

    pub fn head_variables(&self) -> Vec<Variable> {
        let mut ordered = Vec::new();
        let mut seen = BTreeSet::new();
        for v in self.head.variables() {
            if seen.insert(v.clone()) {
                ordered.push(v);
            }
        }
        ordered
    }

    pub fn body_variables(&self) -> Vec<Variable> {
        self.body.variables()
    }

    /// True when some variable occurs exactly once across the head and
    /// body.
    pub fn has_singleton_var(&self) -> bool {
        let mut count = BTreeMap::<Variable, usize>::new();
        for v in self
            .head
            .variables()
            .into_iter()
            .chain(self.body.iter().flat_map(|l| l.variables()))
        {
            *count.entry(v).or_insert(0) += 1;
        }
        count.values().any(|&n| n == 1)
    }

    pub fn substitute(&self, map: &Substitution) -> Clause {
        Self::new(self.head.substitute(map), self.body.substitute(map))
    }

    /// Rename every occurrence of `old` to `new`, in head and body.
    pub fn substitute_predicate(&self, old: &Predicate, new: &Predicate) -> Clause {
        let head = if self.head.predicate() == old {
            assert_eq!(old.arity(), new.arity());
            Atom::new(new.clone(), self.head.arguments().to_vec())
        } else {
            self.head.clone()
        };
        Self::new(head, self.body.substitute_predicate(old, new))
    }

    /// Replace the head predicate, keeping the argument order.
    pub fn substitute_head_predicate(&self, new: &Predicate) -> Clause {
        assert_eq!(self.head.predicate().arity(), new.arity());
        Self::new(
            Atom::new(new.clone(), self.head.arguments().to_vec()),
            self.body.clone(),
        )
    }
}

impl ops::BitAnd<Atom> for Clause {
    type Output = Clause;

    fn bitand(self, rhs: Atom) -> Clause {
        Clause::new(self.head, self.body.and_also([Literal::Atom(rhs)]))
    }
}

impl ops::BitAnd<Literal> for Clause {
    type Output = Clause;

    fn bitand(self, rhs: Literal) -> Clause {
        Clause::new(self.head, self.body.and_also([rhs]))
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            f.write_fmt(format_args!("{}.", self.head))
        } else {
            f.write_fmt(format_args!("{} :- {}.", self.head, self.body))
        }
    }
}

/// Alternative clauses for one head predicate, without recursion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Disjunction(Vec<Clause>);

impl Disjunction {
    pub fn new(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self(clauses.into_iter().collect())
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The common head predicate of the alternatives.
    pub fn predicate(&self) -> Option<&Predicate> {
        self.0.first().map(|c| c.head().predicate())
    }

    pub fn substitute_head_predicate(&self, new: &Predicate) -> Self {
        Self(
            self.iter()
                .map(|c| c.substitute_head_predicate(new))
                .collect(),
        )
    }

    pub fn substitute_predicate(&self, old: &Predicate, new: &Predicate) -> Self {
        Self(
            self.iter()
                .map(|c| c.substitute_predicate(old, new))
                .collect(),
        )
    }
}

impl IntoIterator for Disjunction {
    type Item = Clause;
    type IntoIter = vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Disjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            &self
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ; "),
        )
    }
}

/// Clauses defining one head predicate with at least one self-recursive
/// case, partitioned into base and recursive cases. Consumers that
/// cannot translate a self-recursive clause in isolation go through
/// this grouping instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Recursion(Vec<Clause>);

impl Recursion {
    pub fn new(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self(clauses.into_iter().collect())
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.0.iter()
    }

    /// The common head predicate of the cases.
    pub fn predicate(&self) -> Option<&Predicate> {
        self.0.first().map(|c| c.head().predicate())
    }

    /// The non-recursive cases.
    pub fn base_cases(&self) -> Vec<&Clause> {
        self.iter().filter(|c| !c.is_recursive()).collect()
    }

    /// The self-recursive cases.
    pub fn recursive_cases(&self) -> Vec<&Clause> {
        self.iter().filter(|c| c.is_recursive()).collect()
    }

    pub fn substitute_head_predicate(&self, new: &Predicate) -> Self {
        Self(
            self.iter()
                .map(|c| c.substitute_predicate(c.head().predicate(), new))
                .collect(),
        )
    }

    pub fn substitute_predicate(&self, old: &Predicate, new: &Predicate) -> Self {
        Self(
            self.iter()
                .map(|c| c.substitute_predicate(old, new))
                .collect(),
        )
    }
}

impl IntoIterator for Recursion {
    type Item = Clause;
    type IntoIter = vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn things() -> Type {
        Type::new(THING)
    }

    fn cst(name: &str) -> Term {
        Term::Constant(Constant::new(name, things()))
    }

    fn var(name: &str) -> Term {
        Term::Variable(Variable::new(name, things()))
    }

    fn pred(name: &str, arity: usize) -> Predicate {
        Predicate::new(name, (0..arity).map(|_| things()))
    }

    macro_rules! atom {
        ($pred:ident($($arg:expr),*)) => {{
            let args = vec![$($arg),*];
            Atom::new(pred(stringify!($pred), args.len()), args)
        }};
    }

    #[test]
    fn ground_atoms() {
        assert!(atom!(p(cst("a"), cst("b"))).is_ground());
        assert!(!atom!(p(cst("a"), var("X"))).is_ground());
        let f = Functor::new("f", 1, None);
        assert!(!atom!(p(Term::Structure(Structure::new(f, [var("X")])))).is_ground());
    }

    #[test]
    fn display() {
        let f = Functor::new("f", 2, None);
        let s = Structure::new(f, [cst("a"), var("X")]);
        assert_eq!(s.to_string(), "f(a,X)");
        let list = Structure::new(Functor::new(LIST_FUNCTOR, 2, None), [cst("a"), cst("b")]);
        assert_eq!(list.to_string(), "[a,b]");
        let pair = Structure::new(Functor::new(PAIR_FUNCTOR, 2, None), [cst("a"), var("T")]);
        assert_eq!(pair.to_string(), "[a | T]");

        let head = atom!(grandparent(var("X"), var("Z")));
        let body = atom!(parent(var("X"), var("Y"))) & atom!(parent(var("Y"), var("Z")));
        let clause = Clause::new(head, body);
        assert_eq!(
            clause.to_string(),
            "grandparent(X,Z) :- parent(X,Y), parent(Y,Z)."
        );
        assert_eq!(Clause::fact(atom!(p(cst("a")))).to_string(), "p(a).");
        assert_eq!(Literal::Not(atom!(p(var("X")))).to_string(), "\\+ p(X)");
    }

    #[test]
    fn body_variable_order_is_first_occurrence() {
        let body = atom!(q(var("Y"), var("X"))) & atom!(r(var("X"), var("Z")));
        let names = body
            .variables()
            .into_iter()
            .map(|v| v.name().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Y", "X", "Z"]);
    }

    #[test]
    fn recursive_clause() {
        let base = Clause::new(
            atom!(path(var("X"), var("Y"))),
            Body::new([Literal::Atom(atom!(edge(var("X"), var("Y"))))]),
        );
        let step = Clause::new(
            atom!(path(var("X"), var("Y"))),
            atom!(edge(var("X"), var("Z"))) & atom!(path(var("Z"), var("Y"))),
        );
        assert!(!base.is_recursive());
        assert!(step.is_recursive());

        let rec = Recursion::new([base.clone(), step.clone()]);
        assert_eq!(rec.base_cases(), [&base]);
        assert_eq!(rec.recursive_cases(), [&step]);
    }

    #[test]
    fn substitution_builds_new_terms() {
        let a = atom!(p(var("X"), cst("b")));
        let map = Substitution::from([(var("X"), cst("a"))]);
        assert_eq!(a.substitute(&map), atom!(p(cst("a"), cst("b"))));
        // Substitution reaches inside structures.
        let f = Functor::new("f", 1, None);
        let nested = atom!(q(Term::Structure(Structure::new(f.clone(), [var("X")]))));
        assert_eq!(
            nested.substitute(&map),
            atom!(q(Term::Structure(Structure::new(f, [cst("a")]))))
        );
        // The original is untouched.
        assert_eq!(a, atom!(p(var("X"), cst("b"))));
    }

    #[test]
    fn predicate_substitution() {
        let p = pred("p", 2);
        let q = pred("q", 2);
        let clause = Clause::new(
            Atom::new(p.clone(), [var("X"), var("Y")]),
            Body::new([
                Literal::Atom(Atom::new(p.clone(), [var("Y"), var("X")])),
                Literal::Not(Atom::new(p.clone(), [var("X"), var("X")])),
            ]),
        );
        let renamed = clause.substitute_predicate(&p, &q);
        assert_eq!(renamed.head().predicate(), &q);
        assert!(renamed.body_predicates().contains(&q));
        assert!(!renamed.body_predicates().contains(&p));
        assert!(renamed.literals()[1].is_negative(), "negation survives");
    }

    #[test]
    fn singleton_variables() {
        let with = Clause::new(
            atom!(p(var("X"))),
            Body::new([Literal::Atom(atom!(q(var("X"), var("Y"))))]),
        );
        let without = Clause::new(
            atom!(p(var("X"))),
            Body::new([Literal::Atom(atom!(q(var("X"), var("X"))))]),
        );
        assert!(with.has_singleton_var());
        assert!(!without.has_singleton_var());
    }
}
