//! Variable scopes and per-shape presence flags.
//!
//! A scope is opened for the layout root, each `group`/`view` body, and
//! each `repeat`. Parameters bind names in the innermost scope, either as
//! fixed values or as incrementing repeat variables. Shape-like elements
//! additionally track whether `bounds`/`color` have been seen, each
//! allowed at most once.

use indexmap::IndexMap;

/// How a parameter name is bound in its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Bound with a single value.
    Fixed,

    /// Bound with a start value, stepped across repeat iterations.
    Incrementing,
}

/// An explicit stack of variable-binding scopes.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<IndexMap<String, Binding>>,
}

impl ScopeStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new innermost scope.
    pub fn push(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    /// Close the innermost scope, dropping its bindings.
    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Bind a name as incrementing in the innermost scope.
    ///
    /// Any existing binding for the name is a conflict; the caller
    /// decides whether generated names are exempt from reporting it.
    pub fn declare_incrementing(&mut self, name: &str) -> Result<(), Binding> {
        let scope = self.innermost();
        match scope.get(name) {
            None => {
                scope.insert(name.to_string(), Binding::Incrementing);
                Ok(())
            }
            Some(existing) => Err(*existing),
        }
    }

    /// Bind a name as fixed in the innermost scope.
    ///
    /// Re-declaring a fixed binding is structurally compatible and
    /// succeeds; a name already bound as incrementing is a conflict.
    pub fn declare_fixed(&mut self, name: &str) -> Result<(), Binding> {
        let scope = self.innermost();
        match scope.get(name) {
            Some(Binding::Incrementing) => Err(Binding::Incrementing),
            _ => {
                scope.insert(name.to_string(), Binding::Fixed);
                Ok(())
            }
        }
    }

    /// Bind a name as fixed in the innermost scope without conflict
    /// checking. Used outside repeat scopes, where re-declaration simply
    /// replaces the value.
    pub fn insert_fixed(&mut self, name: &str) {
        self.innermost().insert(name.to_string(), Binding::Fixed);
    }

    /// Look up a binding in the innermost scope only.
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.scopes.last().and_then(|scope| scope.get(name)).copied()
    }

    fn innermost(&mut self) -> &mut IndexMap<String, Binding> {
        self.scopes
            .last_mut()
            .expect("a scope is open whenever parameters are declared")
    }
}

/// A stack of set-at-most-once presence flags.
///
/// One entry per open shape-like element, tracking whether its `bounds`
/// or `color` child has already appeared.
#[derive(Debug, Default)]
pub struct FlagStack {
    flags: Vec<bool>,
}

impl FlagStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a cleared flag for a newly opened element.
    pub fn push(&mut self) {
        self.flags.push(false);
    }

    /// Pop the flag for a closing element.
    pub fn pop(&mut self) {
        self.flags.pop();
    }

    /// Set the innermost flag, returning whether it was already set.
    pub fn mark(&mut self) -> bool {
        let flag = self
            .flags
            .last_mut()
            .expect("a flag is open whenever its element can be marked");
        let seen = *flag;
        *flag = true;
        seen
    }
}
