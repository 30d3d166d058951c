//! Exercise the engine contract against an in-memory fixture backend.
//! The fixture stores ground atoms as rows of constant ids and
//! answers queries by naive forward chaining; it exists only to test
//! the boundary (real backends live out of tree).

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use horn_context::Context;
use horn_solver::{QueryOptions, Solution, SolveError, Solver};
use horn_syntax::{
    Atom, Clause, Constant, Disjunction, Literal, Predicate, Recursion, Term, Type, Variable,
};

const ENGINE: &str = "table";

/// A stored ground atom: predicate name, arity, constant ids.
type Row = (String, usize, Vec<usize>);

/// One argument of a query or rule pattern.
enum Slot {
    Bound(usize),
    Free(Variable),
}

struct Pattern {
    name: String,
    arity: usize,
    slots: Vec<Slot>,
    domains: Vec<Type>,
}

struct TableSolver<'a> {
    ctx: &'a Context,
    facts: BTreeSet<Row>,
    rules: Vec<Clause>,
}

impl<'a> TableSolver<'a> {
    fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            facts: BTreeSet::new(),
            rules: Vec::new(),
        }
    }

    fn fail(&self, message: impl Into<String>) -> SolveError {
        SolveError::Backend {
            engine: String::from(ENGINE),
            message: message.into(),
        }
    }

    fn encode(&self, atom: &Atom) -> Result<Row, SolveError> {
        let ids = atom
            .arguments()
            .iter()
            .map(|t| match t {
                Term::Constant(c) => Ok(c.id()),
                t => Err(self.fail(format!("non-constant argument {t}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((
            String::from(atom.predicate().name()),
            atom.predicate().arity(),
            ids,
        ))
    }

    fn pattern(&self, atom: &Atom) -> Result<Pattern, SolveError> {
        let slots = atom
            .arguments()
            .iter()
            .map(|t| match t {
                Term::Constant(c) => Ok(Slot::Bound(c.id())),
                Term::Variable(v) => Ok(Slot::Free(v.clone())),
                t => Err(self.fail(format!("unsupported argument {t}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pattern {
            name: String::from(atom.predicate().name()),
            arity: atom.predicate().arity(),
            slots,
            domains: atom.predicate().domains().to_vec(),
        })
    }

    fn patterns(&self, literals: &[Literal]) -> Result<Vec<Pattern>, SolveError> {
        literals
            .iter()
            .map(|l| match l {
                Literal::Atom(a) => self.pattern(a),
                Literal::Not(_) => Err(self.fail("negation is not supported")),
            })
            .collect()
    }

    /// Join the patterns left to right against the fact table.
    fn solve(
        &self,
        facts: &BTreeSet<Row>,
        patterns: &[Pattern],
    ) -> Vec<BTreeMap<Variable, usize>> {
        let mut bindings = vec![BTreeMap::new()];
        for pattern in patterns {
            let mut extended = Vec::new();
            for binding in &bindings {
                for (name, arity, ids) in facts {
                    if *name != pattern.name || *arity != pattern.arity {
                        continue;
                    }
                    let mut candidate = binding.clone();
                    let mut ok = true;
                    for (slot, &id) in pattern.slots.iter().zip(ids) {
                        match slot {
                            Slot::Bound(b) => ok = *b == id,
                            Slot::Free(v) => match candidate.get(v) {
                                Some(&bound) => ok = bound == id,
                                None => {
                                    candidate.insert(v.clone(), id);
                                }
                            },
                        }
                        if !ok {
                            break;
                        }
                    }
                    if ok {
                        extended.push(candidate);
                    }
                }
            }
            bindings = extended;
        }
        bindings
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Naive bottom-up fixpoint over the asserted rules.
    fn saturate(&self) -> Result<BTreeSet<Row>, SolveError> {
        let mut facts = self.facts.clone();
        loop {
            let mut added = false;
            for rule in &self.rules {
                let body = self.patterns(rule.literals())?;
                let head = self.pattern(rule.head())?;
                for binding in self.solve(&facts, &body) {
                    let ids = head
                        .slots
                        .iter()
                        .map(|slot| match slot {
                            Slot::Bound(id) => Ok(*id),
                            Slot::Free(v) => binding
                                .get(v)
                                .copied()
                                .ok_or_else(|| self.fail(format!("unsafe head variable {v}"))),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    if facts.insert((head.name.clone(), head.arity, ids)) {
                        added = true;
                    }
                }
            }
            if !added {
                return Ok(facts);
            }
        }
    }
}

impl Solver for TableSolver<'_> {
    fn name(&self) -> &str {
        ENGINE
    }

    fn declare_type(&mut self, ty: &Type) -> Result<(), SolveError> {
        ty.attach_handle(ENGINE, Rc::new(ty.len()));
        Ok(())
    }

    fn declare_constant(&mut self, constant: &Constant) -> Result<(), SolveError> {
        constant.attach_handle(ENGINE, Rc::new(constant.id()));
        Ok(())
    }

    fn declare_predicate(&mut self, predicate: &Predicate) -> Result<(), SolveError> {
        predicate.attach_handle(
            ENGINE,
            Rc::new((String::from(predicate.name()), predicate.arity())),
        );
        Ok(())
    }

    fn declare_variable(&mut self, variable: &Variable) -> Result<(), SolveError> {
        variable.attach_handle(ENGINE, Rc::new(String::from(variable.name())));
        Ok(())
    }

    fn assert_fact(&mut self, fact: &Atom) -> Result<(), SolveError> {
        let row = self.encode(fact)?;
        self.facts.insert(row);
        Ok(())
    }

    fn assert_rule(&mut self, rule: &Clause) -> Result<(), SolveError> {
        self.rules.push(rule.clone());
        Ok(())
    }

    fn has_solution(&mut self, query: &[Literal]) -> Result<bool, SolveError> {
        Ok(!self.query(query, &QueryOptions::at_most(1))?.is_empty())
    }

    fn query(
        &mut self,
        query: &[Literal],
        options: &QueryOptions,
    ) -> Result<Vec<Solution>, SolveError> {
        let patterns = self.patterns(query)?;
        let facts = self.saturate()?;

        // The domain each free variable decodes under: that of its
        // first occurrence.
        let mut domains = BTreeMap::new();
        for pattern in &patterns {
            for (slot, domain) in pattern.slots.iter().zip(&pattern.domains) {
                if let Slot::Free(v) = slot {
                    domains.entry(v.clone()).or_insert_with(|| domain.clone());
                }
            }
        }

        let mut solutions = Vec::new();
        for binding in self.solve(&facts, &patterns) {
            let mut solution = Solution::new();
            for (v, id) in binding {
                let domain = &domains[&v];
                let constant = self
                    .ctx
                    .constant_by_id(id, domain)
                    .map_err(|e| self.fail(e.to_string()))?;
                solution.insert(v, Term::Constant(constant));
            }
            solutions.push(solution);
        }
        match options.max_solutions {
            n if n < 0 => {}
            n => solutions.truncate(n as usize),
        }
        Ok(solutions)
    }
}

fn graph(ctx: &Context) -> Vec<Clause> {
    ctx.parse_program(
        "edge(v1, v2).
         edge(v1, v3).
         edge(v2, v4).
         path(X, Y) :- edge(X, Y).
         path(X, Y) :- edge(X, Z), path(Z, Y).",
    )
    .expect("program")
}

fn atom_of(ctx: &Context, predicate: &Predicate, args: &[&str]) -> Literal {
    Literal::Atom(
        ctx.atom(predicate, args.iter().map(|&a| a.into()))
            .expect("atom"),
    )
}

#[test]
fn declarations_attach_handles() {
    let ctx = Context::new();
    graph(&ctx);
    let mut solver = TableSolver::new(&ctx);
    solver.load(&ctx).unwrap();

    let v2 = ctx.constant("v2", None).unwrap();
    let handle = v2.handle(ENGINE).expect("constant handle");
    assert_eq!(handle.downcast_ref::<usize>(), Some(&v2.id()));

    let things = ctx.domain("thing");
    let handle = things.handle(ENGINE).expect("type handle");
    assert_eq!(handle.downcast_ref::<usize>(), Some(&4), "v1..v4");

    let edge = ctx.predicate("edge", 2, None);
    let handle = edge.handle(ENGINE).expect("predicate handle");
    assert_eq!(
        handle.downcast_ref::<(String, usize)>(),
        Some(&(String::from("edge"), 2))
    );

    let x = ctx.variable("X", None).unwrap();
    assert!(x.handle(ENGINE).is_some(), "variable handle");
}

#[test]
fn path_queries_count_solutions() {
    let ctx = Context::new();
    let program = graph(&ctx);
    let mut solver = TableSolver::new(&ctx);
    solver.load(&ctx).unwrap();

    for fact in &program[..3] {
        solver.assert_fact(fact.head()).unwrap();
    }
    solver
        .assert_recursion(&Recursion::new(program[3..].to_vec()))
        .unwrap();

    let path = ctx.predicate("path", 2, None);
    let from_v1 = [atom_of(&ctx, &path, &["v1", "X"])];
    let all_pairs = [atom_of(&ctx, &path, &["X", "Y"])];

    assert_eq!(solver.query(&from_v1, &QueryOptions::all()).unwrap().len(), 3);
    assert_eq!(
        solver.query(&all_pairs, &QueryOptions::all()).unwrap().len(),
        4
    );

    let edge = ctx.predicate("edge", 2, None);
    let grown = ctx.atom(&edge, ["v4".into(), "v5".into()]).unwrap();
    solver.declare_constant(&ctx.constant("v5", None).unwrap()).unwrap();
    solver.assert_fact(&grown).unwrap();
    assert_eq!(
        solver.query(&all_pairs, &QueryOptions::all()).unwrap().len(),
        7
    );

    // Result caps: 0 means none, a positive n caps the count.
    assert_eq!(
        solver.query(&all_pairs, &QueryOptions::at_most(2)).unwrap().len(),
        2
    );
    assert!(solver
        .query(&all_pairs, &QueryOptions::at_most(0))
        .unwrap()
        .is_empty());

    // Bindings come back as canonical constants of the context.
    let x = ctx.variable("X", None).unwrap();
    for solution in solver.query(&from_v1, &QueryOptions::all()).unwrap() {
        match &solution[&x] {
            Term::Constant(c) => {
                assert!(ctx.constant(c.name(), None).unwrap().ptr_eq(c));
            }
            t => panic!("expected a constant, got {t}"),
        }
    }

    assert!(solver.has_solution(&[atom_of(&ctx, &path, &["v1", "v4"])]).unwrap());
    assert!(!solver.has_solution(&[atom_of(&ctx, &path, &["v3", "X"])]).unwrap());
}

#[test]
fn disjunctions_refuse_self_recursive_clauses() {
    let ctx = Context::new();
    let fine = ctx.parse_clause("p(X) :- q(X).").unwrap();
    let looping = ctx.parse_clause("p(X) :- p(X).").unwrap();
    let mut solver = TableSolver::new(&ctx);

    assert!(solver
        .assert_disjunction(&Disjunction::new([fine.clone()]))
        .is_ok());
    assert!(matches!(
        solver.assert_disjunction(&Disjunction::new([fine, looping])),
        Err(SolveError::RecursiveUnfold(_))
    ));
}
