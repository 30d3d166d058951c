//! The callback contract between the clause algebra and a concrete
//! logic engine. A backend adapter receives declarations for every
//! interned symbol, attaching an opaque handle of its own onto each
//! canonical object, then takes facts and rules and answers queries.
//! Unification, resolution, and constraint solving all live on the
//! far side of this trait.

use std::collections::BTreeMap;

use thiserror::Error;

use horn_context::Context;
use horn_syntax::{
    Atom, Clause, Constant, Disjunction, Literal, Predicate, Recursion, Term, Type, Variable,
};

/// Things that may go wrong at the engine boundary.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SolveError {
    /// A self-recursive clause reached a path that translates clauses
    /// one at a time; recursive definitions must go through
    /// [`Solver::assert_recursion`].
    #[error("self-recursive clause `{0}` needs the recursion-aware path")]
    RecursiveUnfold(Clause),

    #[error("{engine}: {message}")]
    Backend { engine: String, message: String },
}

/// One answer to a query: every free variable of the query literals,
/// bound to a term reconstructed through the context.
pub type Solution = BTreeMap<Variable, Term>;

/// Per-query controls. `max_solutions` follows the usual convention:
/// `-1` asks for every solution, `0` for none, and a positive `n`
/// caps the count. Everything in `backend` is passed through opaque
/// (per-query time, depth, or inference limits, typically).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryOptions {
    pub max_solutions: i64,
    pub backend: BTreeMap<String, String>,
}

impl QueryOptions {
    pub fn all() -> Self {
        Self {
            max_solutions: -1,
            backend: BTreeMap::new(),
        }
    }

    pub fn at_most(n: i64) -> Self {
        Self {
            max_solutions: n,
            backend: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.backend.insert(key.into(), value.into());
        self
    }
}

/// A logic-programming backend. Declarations must attach a handle
/// onto the given canonical object as an observable side effect, so
/// that later assertions and queries can find the engine's own
/// representation again.
pub trait Solver {
    /// The engine name, which also keys the handles it attaches.
    fn name(&self) -> &str;

    fn declare_type(&mut self, ty: &Type) -> Result<(), SolveError>;
    fn declare_constant(&mut self, constant: &Constant) -> Result<(), SolveError>;
    fn declare_predicate(&mut self, predicate: &Predicate) -> Result<(), SolveError>;
    fn declare_variable(&mut self, variable: &Variable) -> Result<(), SolveError>;

    /// Push one ground fact into the knowledge base.
    fn assert_fact(&mut self, fact: &Atom) -> Result<(), SolveError>;

    /// Push one rule into the knowledge base.
    fn assert_rule(&mut self, rule: &Clause) -> Result<(), SolveError>;

    /// Can the conjunction of literals be satisfied at all?
    fn has_solution(&mut self, query: &[Literal]) -> Result<bool, SolveError>;

    /// Bindings for the free variables of the query, at most
    /// `options.max_solutions` of them (`-1` for all).
    fn query(
        &mut self,
        query: &[Literal],
        options: &QueryOptions,
    ) -> Result<Vec<Solution>, SolveError>;

    /// Declare everything interned in the context so far: types,
    /// then constants, predicates, and variables.
    fn load(&mut self, ctx: &Context) -> Result<(), SolveError> {
        for ty in ctx.types() {
            self.declare_type(&ty)?;
        }
        for constant in ctx.constants() {
            self.declare_constant(&constant)?;
        }
        for predicate in ctx.predicates() {
            self.declare_predicate(&predicate)?;
        }
        for variable in ctx.variables() {
            self.declare_variable(&variable)?;
        }
        Ok(())
    }

    /// A fact or a rule, as the body dictates.
    fn assert_clause(&mut self, clause: &Clause) -> Result<(), SolveError> {
        if clause.is_empty() {
            self.assert_fact(clause.head())
        } else {
            self.assert_rule(clause)
        }
    }

    /// Assert a non-recursive definition clause by clause. This path
    /// translates each clause in isolation, so a self-recursive
    /// clause is refused.
    fn assert_disjunction(&mut self, clauses: &Disjunction) -> Result<(), SolveError> {
        for clause in clauses.iter() {
            if clause.is_recursive() {
                return Err(SolveError::RecursiveUnfold(clause.clone()));
            }
            self.assert_clause(clause)?;
        }
        Ok(())
    }

    /// Assert a recursive definition, base cases before recursive
    /// ones.
    fn assert_recursion(&mut self, recursion: &Recursion) -> Result<(), SolveError> {
        for clause in recursion.base_cases() {
            self.assert_clause(clause)?;
        }
        for clause in recursion.recursive_cases() {
            self.assert_clause(clause)?;
        }
        Ok(())
    }
}
