//! Term signatures: a cheap structural test for whether two literal
//! sequences are identical up to variable renaming and literal order,
//! with no unification involved. Each term is summarized by the
//! multiset of (predicate name, argument position) slots it occupies;
//! two sequences match when their signature multisets correspond
//! one-to-one.
//!
//! Constants are summarized by occurrence pattern exactly like
//! variables, so two sequences differing only in *which* constant
//! fills a slot still compare identical. That suits schema-level
//! deduplication; callers needing constant-sensitive comparison must
//! check argument equality themselves.

use std::collections::{BTreeMap, BTreeSet};

use horn_syntax::{Literal, Term};

/// One occupied slot: predicate name and argument position. Negated
/// occurrences are recorded under `not_<predicate>` so that a term
/// under negation never matches a positive occurrence in the same
/// slot.
pub type Occurrence = (String, usize);

/// Each term of a literal sequence, mapped to the multiset of slots
/// it occupies.
pub type TermSignatures = BTreeMap<Term, BTreeMap<Occurrence, usize>>;

/// Build the signature of every term occurring in the sequence.
pub fn term_signatures<'a>(literals: impl IntoIterator<Item = &'a Literal>) -> TermSignatures {
    let mut signatures = TermSignatures::new();
    for literal in literals {
        let predicate = match literal {
            Literal::Atom(a) => String::from(a.predicate().name()),
            Literal::Not(a) => format!("not_{}", a.predicate().name()),
        };
        for (position, term) in literal.atom().arguments().iter().enumerate() {
            *signatures
                .entry(term.clone())
                .or_default()
                .entry((predicate.clone(), position))
                .or_insert(0) += 1;
        }
    }
    signatures
}

/// Do two signature maps describe the same sequence up to relabeling
/// of terms? Inverting each side (signature multiset back to term)
/// must yield the same set of multisets, with the same cardinality on
/// both sides.
pub fn identical_up_to_renaming(left: &TermSignatures, right: &TermSignatures) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let linv = left.values().collect::<BTreeSet<_>>();
    let rinv = right.values().collect::<BTreeSet<_>>();
    linv == rinv
}

#[cfg(test)]
mod test {
    use super::*;

    use horn_context::Context;

    fn literals(ctx: &Context, text: &str) -> Vec<Literal> {
        ctx.parse_clause(text)
            .expect("clause")
            .literals()
            .to_vec()
    }

    #[test]
    fn signatures_count_occurrences() {
        let ctx = Context::new();
        let body = literals(&ctx, "p :- q(X, Z), q(Z, Y), \\+ r(X).");
        let sigs = term_signatures(&body);
        let x = Term::Variable(ctx.variable("X", None).unwrap());
        let z = Term::Variable(ctx.variable("Z", None).unwrap());
        assert_eq!(
            sigs[&x],
            BTreeMap::from([
                ((String::from("q"), 0), 1),
                ((String::from("not_r"), 0), 1),
            ])
        );
        assert_eq!(
            sigs[&z],
            BTreeMap::from([
                ((String::from("q"), 0), 1),
                ((String::from("q"), 1), 1),
            ])
        );
    }

    #[test]
    fn renaming_is_invisible() {
        let ctx = Context::new();
        let a = term_signatures(&literals(&ctx, "p :- q(X, Z), q(Z, Y)."));
        let b = term_signatures(&literals(&ctx, "p :- q(A, C), q(C, B)."));
        assert!(identical_up_to_renaming(&a, &b));
    }

    #[test]
    fn negation_is_not_conflated() {
        let ctx = Context::new();
        let a = term_signatures(&literals(&ctx, "p :- q(X), r(X)."));
        let b = term_signatures(&literals(&ctx, "p :- q(X), \\+ r(X)."));
        assert!(!identical_up_to_renaming(&a, &b));
    }

    #[test]
    fn different_occurrence_patterns_differ() {
        let ctx = Context::new();
        let a = term_signatures(&literals(&ctx, "p :- q(X, Z), q(Z, Y), r(X)."));
        let b = term_signatures(&literals(&ctx, "p :- q(Y, Z), q(Z, X), r(Z)."));
        assert!(!identical_up_to_renaming(&a, &b));
    }
}
