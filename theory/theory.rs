//! A clausal theory: a collection of definite clauses and the
//! transformations over them. The two interesting ones are
//! [`unfolding`](ClausalTheory::unfold), which inlines non-recursive
//! definitions into their callers, and
//! [`duplicate removal`](ClausalTheory::remove_duplicates), which
//! detects clauses identical up to variable renaming and literal
//! order by comparing term signatures.

mod signature;
mod unfold;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::vec;

use horn_context::Context;
use horn_syntax::{Clause, Literal, Predicate};
use horn_tracer::{trace, Trace};

pub use signature::{identical_up_to_renaming, term_signatures, Occurrence, TermSignatures};

/// A collection of clauses.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClausalTheory(Vec<Clause>);

impl ClausalTheory {
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

    /// Heads included.
    pub fn num_literals(&self) -> usize {
        self.iter().map(|c| c.len() + 1).sum()
    }

    /// Every predicate of the theory, heads included.
    pub fn predicates(&self) -> BTreeSet<Predicate> {
        self.iter()
            .flat_map(|c| {
                c.body_predicates()
                    .into_iter()
                    .chain([c.head().predicate().clone()])
            })
            .collect()
    }

    /// The clauses mentioning at least one of the given predicates,
    /// in head or body.
    pub fn clauses_with(&self, predicates: &BTreeSet<Predicate>) -> Vec<&Clause> {
        self.iter()
            .filter(|c| {
                predicates.contains(c.head().predicate())
                    || c.body_predicates().iter().any(|p| predicates.contains(p))
            })
            .collect()
    }

    /// The theory without any clause mentioning one of the given
    /// predicates, in head or body.
    pub fn without_predicates(&self, predicates: &BTreeSet<Predicate>) -> Self {
        Self(
            self.iter()
                .filter(|c| {
                    !predicates.contains(c.head().predicate())
                        && !c.body_predicates().iter().any(|p| predicates.contains(p))
                })
                .cloned()
                .collect(),
        )
    }

    /// Unfold the theory: inline every use of a non-recursive
    /// definition into its callers, down to predicates that are
    /// recursive or undefined here. A theory containing
    ///
    /// ```text
    /// h :- d, c.
    /// d :- a, b.
    /// ```
    ///
    /// unfolds into `h :- a, b, c.` Fresh variables standardize the
    /// inlined bodies apart, which is why the context is needed.
    pub fn unfold(&self, ctx: &Context, trace: Trace) -> Self {
        let unfolded = Self(unfold::unfold_theory(&self.0, ctx));
        trace!(trace, Unfold, "Unfolded theory:\n{unfolded}");
        unfolded
    }

    /// Drop every clause that is a structural duplicate of an
    /// earlier one. Only clauses of equal body length with the same
    /// body predicates are compared, and the first of an equal class
    /// survives; relative order is otherwise preserved.
    pub fn remove_duplicates(&self, trace: Trace) -> Self {
        let mut by_len = BTreeMap::<usize, Vec<usize>>::new();
        for (i, clause) in self.iter().enumerate() {
            by_len.entry(clause.len()).or_default().push(i);
        }

        let mut removed = BTreeSet::new();
        for group in by_len.values() {
            let signatures = group
                .iter()
                .map(|&i| clause_signatures(&self.0[i]))
                .collect::<Vec<_>>();
            for (a, &i) in group.iter().enumerate() {
                if removed.contains(&i) {
                    continue;
                }
                for (b, &j) in group.iter().enumerate().skip(a + 1) {
                    if removed.contains(&j) {
                        continue;
                    }
                    if self.0[i].body_predicates() == self.0[j].body_predicates()
                        && identical_up_to_renaming(&signatures[a], &signatures[b])
                    {
                        trace!(trace, Dedup, "Dropping duplicate: {}", self.0[j]);
                        removed.insert(j);
                    }
                }
            }
        }

        Self(
            self.iter()
                .enumerate()
                .filter(|(i, _)| !removed.contains(i))
                .map(|(_, c)| c.clone())
                .collect(),
        )
    }
}

/// Are two clauses identical up to variable renaming and literal
/// order? The head participates in the signatures, so clauses that
/// only permute head argument roles do not collapse.
pub fn structurally_identical(left: &Clause, right: &Clause) -> bool {
    identical_up_to_renaming(&clause_signatures(left), &clause_signatures(right))
}

fn clause_signatures(clause: &Clause) -> TermSignatures {
    let head = Literal::Atom(clause.head().clone());
    term_signatures(std::iter::once(&head).chain(clause.literals().iter()))
}

impl FromIterator<Clause> for ClausalTheory {
    fn from_iter<I: IntoIterator<Item = Clause>>(clauses: I) -> Self {
        Self::new(clauses)
    }
}

impl IntoIterator for ClausalTheory {
    type Item = Clause;
    type IntoIter = vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ClausalTheory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in self.iter() {
            clause.fmt(f)?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}
