//! Interned logical symbols: domains, constants, variables, predicates,
//! and functors. Each is a shared handle to a canonical allocation, so
//! that two symbols obtained from the same `Context` for the same name
//! compare *and* point equal. Backend adapters rely on pointer identity
//! to attach their own objects onto a symbol (see `attach_handle`).

use std::any::Any;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// The functor underlying list terms: `.(a, .(b, ...))`, written `[a, b]`
/// with the empty tail left implicit.
pub const LIST_FUNCTOR: &str = ".";

/// The functor underlying explicit head/tail cells, written `[h | t]`.
/// SWI-Prolog spells it this way; GNU Prolog and XSB reuse `.`.
pub const PAIR_FUNCTOR: &str = "[|]";

/// The universal default domain.
pub const THING: &str = "thing";

/// The predefined numeric domain.
pub const NUMBER: &str = "number";

/// An opaque object some backend engine associates with a symbol.
pub type EngineHandle = Rc<dyn Any>;

/// Per-backend handle slots, keyed by engine name.
#[derive(Default)]
struct Handles(RefCell<BTreeMap<String, EngineHandle>>);

impl Handles {
    fn attach(&self, engine: &str, handle: EngineHandle) {
        self.0.borrow_mut().insert(engine.to_owned(), handle);
    }

    fn get(&self, engine: &str) -> Option<EngineHandle> {
        self.0.borrow().get(engine).cloned()
    }
}

impl fmt::Debug for Handles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.borrow().keys()).finish()
    }
}

/// A named domain of constants. Domains partition the constant
/// vocabulary; a constant belongs to exactly one.
#[derive(Clone, Debug)]
pub struct Type(Rc<TypeInner>);

#[derive(Debug)]
struct TypeInner {
    name: String,
    /// Creation-ordered members. Weak, because each member holds a
    /// strong reference back to its domain.
    members: RefCell<Vec<Weak<ConstantInner>>>,
    handles: Handles,
}

impl Type {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(TypeInner {
            name: name.into(),
            members: RefCell::new(Vec::new()),
            handles: Handles::default(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// How many constants have been created in this domain.
    pub fn len(&self) -> usize {
        self.0.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The member constants, in creation (id) order.
    pub fn members(&self) -> Vec<Constant> {
        self.0
            .members
            .borrow()
            .iter()
            .filter_map(|w| w.upgrade().map(Constant))
            .collect()
    }

    /// Same canonical allocation?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn attach_handle(&self, engine: &str, handle: EngineHandle) {
        self.0.handles.attach(engine, handle);
    }

    pub fn handle(&self, engine: &str) -> Option<EngineHandle> {
        self.0.handles.get(engine)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl Eq for Type {}

impl PartialOrd for Type {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Type {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.name.cmp(&other.0.name)
    }
}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A constant symbol: a leaf value belonging to one domain, with a
/// domain-scoped id assigned in creation order (used by finite-domain
/// backends to map between symbols and native encodings).
#[derive(Clone, Debug)]
pub struct Constant(Rc<ConstantInner>);

#[derive(Debug)]
struct ConstantInner {
    name: String,
    domain: Type,
    id: usize,
    handles: Handles,
}

impl Constant {
    /// Create a constant and enroll it in its domain, taking the next
    /// id. The name is *not* checked here; canonicalizing constructors
    /// validate against the lexical grammar first.
    pub fn new(name: impl Into<String>, domain: Type) -> Self {
        let mut members = domain.0.members.borrow_mut();
        let id = members.len();
        let inner = Rc::new(ConstantInner {
            name: name.into(),
            domain: domain.clone(),
            id,
            handles: Handles::default(),
        });
        members.push(Rc::downgrade(&inner));
        drop(members);
        Self(inner)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn domain(&self) -> &Type {
        &self.0.domain
    }

    /// The creation-ordered id within this constant's domain.
    pub fn id(&self) -> usize {
        self.0.id
    }

    /// Same canonical allocation?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn attach_handle(&self, engine: &str, handle: EngineHandle) {
        self.0.handles.attach(engine, handle);
    }

    pub fn handle(&self, engine: &str) -> Option<EngineHandle> {
        self.0.handles.get(engine)
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name && self.0.domain == other.0.domain
    }
}

impl Eq for Constant {}

impl PartialOrd for Constant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Constant {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.name(), self.domain().name()).cmp(&(other.name(), other.domain().name()))
    }
}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
        self.0.domain.hash(state);
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A logical variable. Two variables are equal only when both their
/// names and their domains are.
#[derive(Clone, Debug)]
pub struct Variable(Rc<VariableInner>);

#[derive(Debug)]
struct VariableInner {
    name: String,
    domain: Type,
    handles: Handles,
}

impl Variable {
    pub fn new(name: impl Into<String>, domain: Type) -> Self {
        Self(Rc::new(VariableInner {
            name: name.into(),
            domain,
            handles: Handles::default(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn domain(&self) -> &Type {
        &self.0.domain
    }

    /// Same canonical allocation?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn attach_handle(&self, engine: &str, handle: EngineHandle) {
        self.0.handles.attach(engine, handle);
    }

    pub fn handle(&self, engine: &str) -> Option<EngineHandle> {
        self.0.handles.get(engine)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name && self.0.domain == other.0.domain
    }
}

impl Eq for Variable {}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.name(), self.domain().name()).cmp(&(other.name(), other.domain().name()))
    }
}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
        self.0.domain.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A relation symbol: name, arity, and one argument domain per position.
#[derive(Clone, Debug)]
pub struct Predicate(Rc<PredicateInner>);

#[derive(Debug)]
struct PredicateInner {
    name: String,
    domains: Vec<Type>,
    handles: Handles,
}

impl Predicate {
    pub fn new(name: impl Into<String>, domains: impl IntoIterator<Item = Type>) -> Self {
        Self(Rc::new(PredicateInner {
            name: name.into(),
            domains: domains.into_iter().collect(),
            handles: Handles::default(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn arity(&self) -> usize {
        self.0.domains.len()
    }

    pub fn domains(&self) -> &[Type] {
        &self.0.domains
    }

    /// The predicate indicator, e.g. `("edge", 2)`.
    pub fn signature(&self) -> (&str, usize) {
        (self.name(), self.arity())
    }

    /// Same canonical allocation?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn attach_handle(&self, engine: &str, handle: EngineHandle) {
        self.0.handles.attach(engine, handle);
    }

    pub fn handle(&self, engine: &str) -> Option<EngineHandle> {
        self.0.handles.get(engine)
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name && self.0.domains == other.0.domains
    }
}

impl Eq for Predicate {}

impl PartialOrd for Predicate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Predicate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.name(), self.arity(), self.domains()).cmp(&(
            other.name(),
            other.arity(),
            other.domains(),
        ))
    }
}

impl Hash for Predicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
        self.0.domains.len().hash(state);
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A constructor symbol: applying it to arguments yields a `Structure`
/// rather than an atom. Argument domains are optional.
#[derive(Clone, Debug)]
pub struct Functor(Rc<FunctorInner>);

#[derive(Debug)]
struct FunctorInner {
    name: String,
    arity: usize,
    domains: Option<Vec<Type>>,
}

impl Functor {
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        domains: Option<Vec<Type>>,
    ) -> Self {
        Self(Rc::new(FunctorInner {
            name: name.into(),
            arity,
            domains,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn arity(&self) -> usize {
        self.0.arity
    }

    pub fn domains(&self) -> Option<&[Type]> {
        self.0.domains.as_deref()
    }

    /// Same canonical allocation?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Functor {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name && self.0.arity == other.0.arity
    }
}

impl Eq for Functor {}

impl PartialOrd for Functor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Functor {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.name(), self.arity()).cmp(&(other.name(), other.arity()))
    }
}

impl Hash for Functor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
        self.0.arity.hash(state);
    }
}

impl fmt::Display for Functor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric literal with a total order, so that terms can live in
/// ordered collections.
#[derive(Clone, Copy, Debug)]
pub struct Float(f64);

impl Float {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Float {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Float {}

impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Float {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn constant_ids_follow_creation_order() {
        let things = Type::new(THING);
        let a = Constant::new("a", things.clone());
        let b = Constant::new("b", things.clone());
        let c = Constant::new("c", things.clone());
        assert_eq!((a.id(), b.id(), c.id()), (0, 1, 2));
        assert_eq!(things.len(), 3);
        assert_eq!(things.members(), vec![a, b, c]);
    }

    #[test]
    fn equality_is_name_and_domain() {
        let things = Type::new(THING);
        let numbers = Type::new(NUMBER);
        let a = Constant::new("a", things.clone());
        let a2 = Constant::new("a", things.clone());
        let a3 = Constant::new("a", numbers.clone());
        assert_eq!(a, a2);
        assert!(!a.ptr_eq(&a2), "distinct allocations compare equal by name");
        assert_ne!(a, a3);
        assert_ne!(
            Variable::new("X", things.clone()),
            Variable::new("X", numbers)
        );
    }

    #[test]
    fn handles_round_trip() {
        let things = Type::new(THING);
        let c = Constant::new("c", things);
        assert!(c.handle("muz").is_none());
        c.attach_handle("muz", Rc::new(42u32));
        let h = c.handle("muz").expect("handle");
        assert_eq!(h.downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn float_total_order() {
        assert_eq!(Float::new(1.5), Float::new(1.5));
        assert!(Float::new(1.0) < Float::new(2.0));
        assert_eq!(Float::new(f64::NAN), Float::new(f64::NAN));
    }
}
