use super::object::Object;
use std::collections::HashMap;

/// Handle to one scope record inside an [`Environment`]. Handles stay valid
/// for the lifetime of the environment, so a closure can outlive the call
/// that created its scope.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScopeId(usize);

#[derive(Default)]
struct Scope {
    bindings: HashMap<String, Object>,
    outer: Option<ScopeId>,
}

/// Arena of chained name→value scopes. Lookup walks outward from the given
/// scope; writes always land in the given scope itself, shadowing (never
/// mutating) outer bindings of the same name.
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    /// The root scope every environment starts with.
    pub const GLOBAL: ScopeId = ScopeId(0);

    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Creates a fresh scope chained to `outer` and returns its handle.
    pub fn enclosed(&mut self, outer: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            bindings: HashMap::new(),
            outer: Some(outer),
        });
        ScopeId(self.scopes.len() - 1)
    }

    pub fn get(&self, scope: ScopeId, name: &str) -> Option<Object> {
        let mut current = Some(scope);
        while let Some(ScopeId(index)) = current {
            let record = &self.scopes[index];
            if let Some(value) = record.bindings.get(name) {
                return Some(value.clone());
            }
            current = record.outer;
        }
        None
    }

    pub fn set(&mut self, scope: ScopeId, name: impl Into<String>, value: Object) {
        let ScopeId(index) = scope;
        self.scopes[index].bindings.insert(name.into(), value);
    }

    pub fn defined_locally(&self, scope: ScopeId, name: &str) -> bool {
        let ScopeId(index) = scope;
        self.scopes[index].bindings.contains_key(name)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
