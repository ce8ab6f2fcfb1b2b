use std::{collections::HashMap, fmt::Display, rc::Rc};

use crate::ast::{
    ast::{Declarations, Function, Variable},
    types::{Prototype, Type},
};

/// Maps each name in scope to its type.
///
/// Function names map to `Type::Prototype`. A map is built once per scope
/// and not changed afterwards; nested scopes are formed with [`TypeMap::onion`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMap {
    entries: HashMap<Variable, Type>,
}

impl TypeMap {
    pub fn new() -> Self {
        TypeMap::default()
    }

    /// Map of a declaration list, one entry per declaration.
    pub fn typing(declarations: &Declarations) -> Self {
        TypeMap {
            entries: declarations
                .iter()
                .map(|declaration| (declaration.variable.clone(), declaration.ty.clone()))
                .collect(),
        }
    }

    /// Map of the outermost scope: every global plus a prototype per function.
    pub fn globals(globals: &Declarations, functions: &[Function]) -> Self {
        let mut map = TypeMap::typing(globals);

        for function in functions {
            let prototype = Prototype {
                result: function.ty.clone(),
                params: function.params.clone(),
            };
            map.entries
                .insert(function.id.clone(), Type::Prototype(Rc::new(prototype)));
        }

        map
    }

    /// Map seen inside `function`: the outer map overlaid with its parameters
    /// and locals.
    pub fn for_function(&self, function: &Function) -> Self {
        let mut scope = function.params.clone();
        scope.extend(function.locals.iter().cloned());

        self.onion(&TypeMap::typing(&scope))
    }

    /// A new map holding both scopes; entries of `inner` win.
    pub fn onion(&self, inner: &TypeMap) -> TypeMap {
        let mut entries = self.entries.clone();
        entries.extend(inner.entries.iter().map(|(k, v)| (k.clone(), v.clone())));

        TypeMap { entries }
    }

    pub fn get(&self, variable: &Variable) -> Option<&Type> {
        self.entries.get(variable)
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.entries.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by name.
    pub fn sorted(&self) -> Vec<(&Variable, &Type)> {
        let mut entries: Vec<(&Variable, &Type)> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Display for TypeMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (variable, ty) in self.sorted() {
            writeln!(f, "\t{}: {}", variable, ty)?;
        }
        Ok(())
    }
}
