//! Unfolding: a resolution-style program transformation that inlines
//! the bodies of non-recursive definitions into their call sites,
//! repeatedly, until only recursive or undefined ("base") predicates
//! remain in clause bodies.
//!
//! Recursively-defined predicates never enter the candidate index, so
//! their clauses are left exactly as written; inlining them could
//! turn finite derivations into infinite ones.

use std::collections::{BTreeMap, BTreeSet};

use horn_context::Context;

use horn_syntax::{Body, Clause, Predicate, Substitution, Term};

/// Non-recursive definitions, indexed by head predicate.
type ClauseIndex = BTreeMap<Predicate, Vec<Clause>>;

/// Unfold a whole theory. Definitions consumed by some inlining are
/// not re-emitted; everything else keeps its relative order.
pub(crate) fn unfold_theory(clauses: &[Clause], ctx: &Context) -> Vec<Clause> {
    let mut recursive = BTreeSet::new();
    let mut index = ClauseIndex::new();
    for clause in clauses {
        if clause.is_recursive() {
            recursive.insert(clause.head().predicate().clone());
        }
        index
            .entry(clause.head().predicate().clone())
            .or_default()
            .push(clause.clone());
    }
    index.retain(|predicate, _| !recursive.contains(predicate));

    let mut expanded = Vec::new();
    let mut consumed = BTreeSet::new();
    for clause in clauses {
        if consumed.contains(clause) {
            continue;
        }
        let (results, used) = unfold_clause(clause, &index, &BTreeSet::new(), ctx);
        expanded.push((clause.clone(), results));
        consumed.extend(used);
    }
    expanded
        .into_iter()
        .filter(|(original, _)| !consumed.contains(original))
        .flat_map(|(_, results)| results)
        .collect()
}

/// Unfold one clause against the index, recursively. The forbidden
/// set carries the definitions already consumed along this expansion
/// chain, so no alternative is inlined twice on one path; that is
/// also what bounds the recursion when definitions refer to each
/// other in a cycle without being self-recursive.
fn unfold_clause(
    clause: &Clause,
    index: &ClauseIndex,
    forbidden: &BTreeSet<Clause>,
    ctx: &Context,
) -> (Vec<Clause>, BTreeSet<Clause>) {
    // Candidate definitions per positive body literal. Negative
    // literals are never inlined: replacing a negated call with its
    // definition's body is only sound for trivial definitions.
    let sites = clause
        .literals()
        .iter()
        .enumerate()
        .filter(|(_, literal)| literal.is_positive())
        .filter_map(|(position, literal)| {
            index.get(literal.predicate()).map(|definitions| {
                let allowed = definitions
                    .iter()
                    .filter(|d| !forbidden.contains(*d))
                    .cloned()
                    .collect::<Vec<_>>();
                (position, allowed)
            })
        })
        .filter(|(_, definitions)| !definitions.is_empty())
        .collect::<Vec<_>>();

    if sites.is_empty() {
        return (vec![clause.clone()], BTreeSet::new());
    }

    let used = sites
        .iter()
        .flat_map(|(_, definitions)| definitions.iter().cloned())
        .collect::<BTreeSet<_>>();
    let mut forbidden = forbidden.clone();
    forbidden.extend(used.iter().cloned());

    let mut results = Vec::new();
    let mut consumed = used;
    for candidate in expansions(clause, &sites, ctx) {
        let (more, used) = unfold_clause(&candidate, index, &forbidden, ctx);
        results.extend(more);
        consumed.extend(used);
    }
    (results, consumed)
}

/// Every way of picking one definition per site, inlined. A pick
/// whose head does not match its literal's arguments contributes
/// nothing; a clause all of whose picks fail expands to nothing at
/// all and is thereby omitted from the theory.
fn expansions(clause: &Clause, sites: &[(usize, Vec<Clause>)], ctx: &Context) -> Vec<Clause> {
    let mut picks: Vec<Vec<(usize, Clause)>> = vec![Vec::new()];
    for (position, definitions) in sites {
        picks = picks
            .into_iter()
            .flat_map(|pick| {
                definitions.iter().map(move |d| {
                    let mut pick = pick.clone();
                    pick.push((*position, d.clone()));
                    pick
                })
            })
            .collect();
    }
    picks
        .into_iter()
        .filter_map(|pick| inline(clause, &pick, ctx))
        .collect()
}

/// Inline one chosen definition at each site. Each definition is
/// standardized apart with fresh variables, its head is matched
/// against the site's arguments, and its body is spliced in place of
/// the site literal. Returns `None` when some head fails to match.
fn inline(clause: &Clause, pick: &[(usize, Clause)], ctx: &Context) -> Option<Clause> {
    let mut caller = Substitution::new();
    let mut spliced = BTreeMap::new();
    for (position, definition) in pick {
        let definition = rename_apart(definition, ctx);
        let literal = &clause.literals()[*position];
        let bindings = match_arguments(
            definition.head().arguments(),
            literal.atom().arguments(),
            &mut caller,
        )?;
        spliced.insert(*position, definition.body().substitute(&bindings));
    }
    resolve(&mut caller);

    let mut literals = Vec::new();
    for (position, literal) in clause.literals().iter().enumerate() {
        match spliced.get(&position) {
            Some(body) => literals.extend(body.iter().map(|l| l.substitute(&caller))),
            None => literals.push(literal.substitute(&caller)),
        }
    }
    Some(Clause::new(
        clause.head().substitute(&caller),
        Body::new(literals),
    ))
}

/// Rename every variable of a definition to a fresh one, so that its
/// body variables can never capture the caller's.
fn rename_apart(definition: &Clause, ctx: &Context) -> Clause {
    let renaming = definition
        .variables()
        .into_iter()
        .map(|v| {
            let fresh = ctx.fresh_variable(Some(v.domain()));
            (Term::Variable(v), Term::Variable(fresh))
        })
        .collect::<Substitution>();
    definition.substitute(&renaming)
}

/// Match a definition head's arguments against a call site's,
/// binding definition variables to caller terms and, where the head
/// carries something concrete, caller variables to it. This is the
/// bounded unification implied by the matching; anything deeper
/// rejects the pick.
fn match_arguments(
    head: &[Term],
    arguments: &[Term],
    caller: &mut Substitution,
) -> Option<Substitution> {
    if head.len() != arguments.len() {
        return None;
    }
    let mut bindings = Substitution::new();
    for (h, a) in head.iter().zip(arguments) {
        match_term(h, &a.substitute(caller), &mut bindings, caller)?;
    }
    Some(bindings)
}

fn match_term(
    head: &Term,
    argument: &Term,
    bindings: &mut Substitution,
    caller: &mut Substitution,
) -> Option<()> {
    match (head, argument) {
        (Term::Variable(_), _) => match bindings.get(head).cloned() {
            None => {
                bindings.insert(head.clone(), argument.clone());
                Some(())
            }
            Some(previous) if &previous == argument => Some(()),
            Some(previous) => {
                // The same head variable against two caller terms:
                // identify them through the caller if one is a
                // variable.
                if matches!(argument, Term::Variable(_)) {
                    caller.insert(argument.clone(), previous);
                    Some(())
                } else if matches!(previous, Term::Variable(_)) {
                    caller.insert(previous, argument.clone());
                    bindings.insert(head.clone(), argument.clone());
                    Some(())
                } else {
                    None
                }
            }
        },
        (_, Term::Variable(_)) => {
            caller.insert(argument.clone(), head.substitute(bindings));
            Some(())
        }
        (Term::Structure(h), Term::Structure(a))
            if h.functor() == a.functor() && h.arity() == a.arity() =>
        {
            for (h, a) in h.arguments().iter().zip(a.arguments()) {
                match_term(h, a, bindings, caller)?;
            }
            Some(())
        }
        _ => (head == argument).then_some(()),
    }
}

/// Chase variable-to-variable chains so that one final substitution
/// pass suffices. Bounded by the map size; an accidental cycle just
/// stops improving.
fn resolve(caller: &mut Substitution) {
    for _ in 0..caller.len() {
        let snapshot = caller.clone();
        let mut changed = false;
        for value in caller.values_mut() {
            let chased = value.substitute(&snapshot);
            if chased != *value {
                *value = chased;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}
