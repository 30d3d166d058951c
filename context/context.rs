//! A symbol-interning context. Requesting the same name (and domain,
//! or arity) twice yields the *same* canonical object, not merely an
//! equal one. That identity is load-bearing: term equality elsewhere
//! is defined by name and domain alone, and backend adapters hang
//! their own objects off the canonical symbols — a second allocation
//! for the same name would silently lose them.
//!
//! There is deliberately no ambient global context; callers construct
//! one and pass it where needed, which keeps interning deterministic
//! and tests isolated.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use horn_syntax::parse::{self, ParsedAtom, ParsedClause, ParsedLiteral, ParsedTerm};
use horn_syntax::{
    classify, Atom, Body, Clause, Constant, Functor, Literal, NameClass, Predicate, Structure,
    Term, Type, Variable, LIST_FUNCTOR, NUMBER, PAIR_FUNCTOR, THING,
};

/// Things that may go wrong looking up or creating symbols. All of
/// them signal a mistake by the calling code, not a runtime condition
/// to retry.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SymbolError {
    #[error("`{name}` is not a valid {class} name")]
    InvalidSymbol { name: String, class: NameClass },

    #[error("`{0}` is registered with arities {1:?}; specify one")]
    Ambiguous(String, Vec<usize>),

    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),

    #[error("no constant with id {id} in domain `{domain}`")]
    UnknownId { id: usize, domain: String },

    #[error("cannot convert `{0}` to a term")]
    Conversion(String),

    #[error("cannot parse `{0}`")]
    Parse(String),
}

/// What a bare name resolved to; see [`Context::symbol`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Symbol {
    Constant(Constant),
    Functor(Functor),
    Predicate(Predicate),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => c.fmt(f),
            Self::Functor(x) => x.fmt(f),
            Self::Predicate(p) => p.fmt(f),
        }
    }
}

/// An argument to a predicate or functor application: either a bare
/// name awaiting lexical classification, or something that is already
/// a term. Numeric literals pass through unconverted.
#[derive(Clone, Debug)]
pub enum Arg {
    Name(String),
    Term(Term),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Name(String::from(s))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<Term> for Arg {
    fn from(t: Term) -> Self {
        Self::Term(t)
    }
}

impl From<Constant> for Arg {
    fn from(c: Constant) -> Self {
        Self::Term(Term::Constant(c))
    }
}

impl From<Variable> for Arg {
    fn from(v: Variable) -> Self {
        Self::Term(Term::Variable(v))
    }
}

impl From<Structure> for Arg {
    fn from(s: Structure) -> Self {
        Self::Term(Term::Structure(s))
    }
}

impl From<i64> for Arg {
    fn from(i: i64) -> Self {
        Self::Term(Term::Int(i))
    }
}

impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Self::Term(Term::from(f))
    }
}

/// The interning tables. Single-writer: interning operations borrow
/// the tables mutably and must not be interleaved from concurrent
/// callers (the type is `!Send` anyway).
pub struct Context {
    domains: RefCell<BTreeMap<String, Type>>,
    constants: RefCell<BTreeMap<(String, String), Constant>>,
    variables: RefCell<BTreeMap<(String, String), Variable>>,
    predicates: RefCell<BTreeMap<(String, usize), Predicate>>,
    functors: RefCell<BTreeMap<(String, usize), Functor>>,
    /// A cache on the atom construction path; not authoritative.
    atoms: RefCell<BTreeMap<(Predicate, Vec<Term>), Atom>>,
    fresh: Cell<usize>,
}

impl Context {
    pub fn new() -> Self {
        let ctx = Self {
            domains: RefCell::new(BTreeMap::new()),
            constants: RefCell::new(BTreeMap::new()),
            variables: RefCell::new(BTreeMap::new()),
            predicates: RefCell::new(BTreeMap::new()),
            functors: RefCell::new(BTreeMap::new()),
            atoms: RefCell::new(BTreeMap::new()),
            fresh: Cell::new(1),
        };
        ctx.domain(THING);
        ctx.domain(NUMBER);
        ctx.intern_functor(LIST_FUNCTOR, 2, None);
        ctx.intern_functor(PAIR_FUNCTOR, 2, None);
        ctx
    }

    /// The existing domain of that name, or a new one.
    pub fn domain(&self, name: &str) -> Type {
        self.domains
            .borrow_mut()
            .entry(String::from(name))
            .or_insert_with(|| Type::new(name))
            .clone()
    }

    fn domain_or_default(&self, domain: Option<&Type>) -> Type {
        domain.cloned().unwrap_or_else(|| self.domain(THING))
    }

    /// The canonical constant for `name` in `domain` (default
    /// `"thing"`), created with the domain's next id if new.
    pub fn constant(&self, name: &str, domain: Option<&Type>) -> Result<Constant, SymbolError> {
        if !horn_syntax::is_constant_name(name) {
            return Err(SymbolError::InvalidSymbol {
                name: String::from(name),
                class: NameClass::Constant,
            });
        }
        let domain = self.domain_or_default(domain);
        Ok(self
            .constants
            .borrow_mut()
            .entry((String::from(domain.name()), String::from(name)))
            .or_insert_with(|| Constant::new(name, domain))
            .clone())
    }

    /// The canonical variable for `name` in `domain` (default
    /// `"thing"`).
    pub fn variable(&self, name: &str, domain: Option<&Type>) -> Result<Variable, SymbolError> {
        if !horn_syntax::is_variable_name(name) {
            return Err(SymbolError::InvalidSymbol {
                name: String::from(name),
                class: NameClass::Variable,
            });
        }
        let domain = self.domain_or_default(domain);
        Ok(self
            .variables
            .borrow_mut()
            .entry((String::from(domain.name()), String::from(name)))
            .or_insert_with(|| Variable::new(name, domain))
            .clone())
    }

    /// A variable whose synthetic name (`_V1`, `_V2`, ...) is not yet
    /// used in the given domain. Creating it reserves the name.
    pub fn fresh_variable(&self, domain: Option<&Type>) -> Variable {
        let domain = self.domain_or_default(domain);
        loop {
            let n = self.fresh.get();
            self.fresh.set(n + 1);
            let name = format!("_V{n}");
            let key = (String::from(domain.name()), name.clone());
            if !self.variables.borrow().contains_key(&key) {
                return self
                    .variables
                    .borrow_mut()
                    .entry(key)
                    .or_insert_with(|| Variable::new(name, domain))
                    .clone();
            }
        }
    }

    /// The canonical predicate for `(name, arity)`. Argument domains
    /// apply on first creation and default to `"thing"` everywhere.
    pub fn predicate(&self, name: &str, arity: usize, domains: Option<&[Type]>) -> Predicate {
        if let Some(domains) = domains {
            assert_eq!(domains.len(), arity);
        }
        self.predicates
            .borrow_mut()
            .entry((String::from(name), arity))
            .or_insert_with(|| {
                let domains = domains
                    .map(<[Type]>::to_vec)
                    .unwrap_or_else(|| vec![self.domain(THING); arity]);
                Predicate::new(name, domains)
            })
            .clone()
    }

    fn intern_functor(&self, name: &str, arity: usize, domains: Option<Vec<Type>>) -> Functor {
        self.functors
            .borrow_mut()
            .entry((String::from(name), arity))
            .or_insert_with(|| Functor::new(name, arity, domains))
            .clone()
    }

    /// The canonical functor for `(name, arity)`. With the arity left
    /// out, a uniquely-determined prior arity is inferred; more than
    /// one registered arity is ambiguous. Creating a new functor
    /// requires an arity or argument domains.
    pub fn functor(
        &self,
        name: &str,
        arity: Option<usize>,
        domains: Option<Vec<Type>>,
    ) -> Result<Functor, SymbolError> {
        let arity = match arity {
            Some(arity) => arity,
            None => {
                let registered = self.functor_arities(name);
                match registered.as_slice() {
                    [arity] => *arity,
                    [] => match &domains {
                        Some(domains) => domains.len(),
                        None => return Err(SymbolError::UnknownSymbol(String::from(name))),
                    },
                    _ => {
                        return Err(SymbolError::Ambiguous(String::from(name), registered.clone()))
                    }
                }
            }
        };
        Ok(self.intern_functor(name, arity, domains))
    }

    fn functor_arities(&self, name: &str) -> Vec<usize> {
        self.functors
            .borrow()
            .keys()
            .filter(|(n, _)| n == name)
            .map(|&(_, arity)| arity)
            .collect()
    }

    /// Resolve a bare name against constants, then functors, then
    /// predicates, in that priority order. An unknown name with an
    /// arity defaults to a new predicate.
    pub fn symbol(&self, name: &str, arity: Option<usize>) -> Result<Symbol, SymbolError> {
        if let Some(c) = self
            .constants
            .borrow()
            .iter()
            .find(|((_, n), _)| n == name)
            .map(|(_, c)| c.clone())
        {
            return Ok(Symbol::Constant(c));
        }
        let functor_arities = self.functor_arities(name);
        match (functor_arities.as_slice(), arity) {
            ([], _) => {}
            ([one], None) => return Ok(Symbol::Functor(self.intern_functor(name, *one, None))),
            (_, None) => {
                return Err(SymbolError::Ambiguous(
                    String::from(name),
                    functor_arities.clone(),
                ))
            }
            (registered, Some(n)) if registered.contains(&n) => {
                return Ok(Symbol::Functor(self.intern_functor(name, n, None)))
            }
            (_, Some(_)) => {}
        }
        let registered = self
            .predicates
            .borrow()
            .iter()
            .filter(|((n, _), _)| n == name)
            .map(|(_, p)| p.clone())
            .collect::<Vec<_>>();
        match (&registered[..], arity) {
            ([p], _) => Ok(Symbol::Predicate(p.clone())),
            ([], Some(arity)) => Ok(Symbol::Predicate(self.predicate(name, arity, None))),
            ([], None) => Err(SymbolError::UnknownSymbol(String::from(name))),
            (many, Some(arity)) => many
                .iter()
                .find(|p| p.arity() == arity)
                .cloned()
                .map(Symbol::Predicate)
                .ok_or_else(|| SymbolError::UnknownSymbol(String::from(name))),
            (many, None) => Err(SymbolError::Ambiguous(
                String::from(name),
                many.iter().map(|p| p.arity()).collect(),
            )),
        }
    }

    /// Invert [`Constant::id`]: the constant created `id`-th in
    /// `domain`.
    pub fn constant_by_id(&self, id: usize, domain: &Type) -> Result<Constant, SymbolError> {
        domain
            .members()
            .get(id)
            .cloned()
            .ok_or_else(|| SymbolError::UnknownId {
                id,
                domain: String::from(domain.name()),
            })
    }

    /// The domain a constant of that name was interned under, or the
    /// default domain if it never was.
    pub fn find_domain(&self, constant_name: &str) -> Type {
        self.constants
            .borrow()
            .iter()
            .find(|((_, n), _)| n == constant_name)
            .map(|(_, c)| c.domain().clone())
            .unwrap_or_else(|| self.domain(THING))
    }

    /// Every domain, in name order.
    pub fn types(&self) -> Vec<Type> {
        self.domains.borrow().values().cloned().collect()
    }

    /// Every interned constant.
    pub fn constants(&self) -> Vec<Constant> {
        self.constants.borrow().values().cloned().collect()
    }

    /// Every interned variable.
    pub fn variables(&self) -> Vec<Variable> {
        self.variables.borrow().values().cloned().collect()
    }

    /// Every interned predicate.
    pub fn predicates(&self) -> Vec<Predicate> {
        self.predicates.borrow().values().cloned().collect()
    }

    fn convert(&self, arg: Arg, domain: Option<&Type>) -> Result<Term, SymbolError> {
        match arg {
            Arg::Term(t) => Ok(t),
            Arg::Name(name) => match classify(&name) {
                Some(NameClass::Constant) => {
                    Ok(Term::Constant(self.constant(&name, domain)?))
                }
                Some(NameClass::Variable) => {
                    Ok(Term::Variable(self.variable(&name, domain)?))
                }
                None => Err(SymbolError::Conversion(name)),
            },
        }
    }

    /// Apply a predicate to arguments: the only literal-construction
    /// path. String arguments are classified by the lexical grammar
    /// and interned under the predicate's per-position domains.
    pub fn atom(
        &self,
        predicate: &Predicate,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Atom, SymbolError> {
        let arguments = args
            .into_iter()
            .enumerate()
            .map(|(i, arg)| self.convert(arg, predicate.domains().get(i)))
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(arguments.len(), predicate.arity());
        Ok(self.literal(predicate, arguments))
    }

    /// Apply a functor to arguments, as [`Context::atom`] does for
    /// predicates.
    pub fn structure(
        &self,
        functor: &Functor,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Structure, SymbolError> {
        let arguments = args
            .into_iter()
            .enumerate()
            .map(|(i, arg)| {
                self.convert(arg, functor.domains().and_then(|domains| domains.get(i)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Structure::new(functor.clone(), arguments))
    }

    /// A finite sequence with an implicit empty tail, built on the
    /// reserved cons functor.
    pub fn list(&self, elements: impl IntoIterator<Item = Arg>) -> Result<Structure, SymbolError> {
        let functor = self.intern_functor(LIST_FUNCTOR, 2, None);
        let elements = elements
            .into_iter()
            .map(|e| self.convert(e, None))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Structure::new(functor, elements))
    }

    /// An explicit head/tail cell, built on the reserved pair functor.
    pub fn pair(&self, head: Arg, tail: Arg) -> Result<Structure, SymbolError> {
        let functor = self.intern_functor(PAIR_FUNCTOR, 2, None);
        let head = self.convert(head, None)?;
        let tail = self.convert(tail, None)?;
        Ok(Structure::new(functor, [head, tail]))
    }

    /// The cached atom for a predicate applied to the given terms.
    /// This is a compatibility cache, not an authority: equal atoms
    /// built elsewhere are just as good.
    pub fn literal(&self, predicate: &Predicate, arguments: Vec<Term>) -> Atom {
        self.atoms
            .borrow_mut()
            .entry((predicate.clone(), arguments.clone()))
            .or_insert_with(|| Atom::new(predicate.clone(), arguments))
            .clone()
    }

    /// Resolve a parsed term, interning names as they classify.
    pub fn resolve_term(&self, term: &ParsedTerm) -> Result<Term, SymbolError> {
        match term {
            ParsedTerm::Name(name) => self.convert(Arg::Name(name.clone()), None),
            ParsedTerm::Int(i) => Ok(Term::Int(*i)),
            ParsedTerm::Float(f) => Ok(Term::Float(*f)),
            ParsedTerm::Structure(functor, args) => {
                let functor = self.functor(functor, Some(args.len()), None)?;
                let args = args
                    .iter()
                    .map(|a| self.resolve_term(a))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Structure(Structure::new(functor, args)))
            }
            ParsedTerm::List(elements) => {
                let functor = self.intern_functor(LIST_FUNCTOR, 2, None);
                let elements = elements
                    .iter()
                    .map(|e| self.resolve_term(e))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Structure(Structure::new(functor, elements)))
            }
            ParsedTerm::Pair(head, tail) => {
                let functor = self.intern_functor(PAIR_FUNCTOR, 2, None);
                let head = self.resolve_term(head)?;
                let tail = self.resolve_term(tail)?;
                Ok(Term::Structure(Structure::new(functor, [head, tail])))
            }
        }
    }

    /// Resolve a parsed atom through the predicate table.
    pub fn resolve_atom(&self, atom: &ParsedAtom) -> Result<Atom, SymbolError> {
        let predicate = self.predicate(&atom.predicate, atom.arguments.len(), None);
        let arguments = atom
            .arguments
            .iter()
            .map(|a| self.resolve_term(a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.literal(&predicate, arguments))
    }

    pub fn resolve_literal(&self, literal: &ParsedLiteral) -> Result<Literal, SymbolError> {
        match literal {
            ParsedLiteral::Atom(a) => Ok(Literal::Atom(self.resolve_atom(a)?)),
            ParsedLiteral::Not(a) => Ok(Literal::Not(self.resolve_atom(a)?)),
        }
    }

    pub fn resolve_clause(&self, clause: &ParsedClause) -> Result<Clause, SymbolError> {
        let head = self.resolve_atom(&clause.head)?;
        let body = clause
            .body
            .iter()
            .map(|l| self.resolve_literal(l))
            .collect::<Result<Body, _>>()?;
        Ok(Clause::new(head, body))
    }

    /// Parse and resolve one clause; a trailing period is optional.
    pub fn parse_clause(&self, text: &str) -> Result<Clause, SymbolError> {
        let (rest, parsed) =
            parse::clause(text).map_err(|_| SymbolError::Parse(String::from(text)))?;
        if !rest.trim_start_matches('.').trim().is_empty() {
            return Err(SymbolError::Parse(String::from(text)));
        }
        self.resolve_clause(&parsed)
    }

    /// Parse and resolve a whole `.`-terminated program.
    pub fn parse_program(&self, text: &str) -> Result<Vec<Clause>, SymbolError> {
        let (rest, parsed) =
            parse::program(text).map_err(|_| SymbolError::Parse(String::from(text)))?;
        if !rest.is_empty() {
            return Err(SymbolError::Parse(String::from(rest)));
        }
        parsed.iter().map(|c| self.resolve_clause(c)).collect()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
