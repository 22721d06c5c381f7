use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::ScopeError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "names", rename_all = "snake_case")]
pub enum ModuleImports {
    Wildcard,
    Only(Vec<String>),
}

impl ModuleImports {
    pub fn names(&self) -> Option<&[String]> {
        match self {
            ModuleImports::Wildcard => None,
            ModuleImports::Only(names) => Some(names),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, ModuleImports::Wildcard)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolTable {
    name: String,
    modules: BTreeMap<String, ModuleImports>,
}

impl SymbolTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self, module: &str) -> Option<&ModuleImports> {
        self.modules.get(module)
    }

    pub fn modules(&self) -> impl Iterator<Item = (&str, &ModuleImports)> {
        self.modules
            .iter()
            .map(|(name, imports)| (name.as_str(), imports))
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub(crate) fn add_use_symbols(&mut self, module: &str, imports: ModuleImports) {
        trace!(scope = %self.name, module, ?imports, "recording use symbols");
        self.modules.insert(module.to_string(), imports);
    }
}

#[derive(Debug, Default)]
pub struct SymbolTables {
    stack: Vec<SymbolTable>,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_scope(&mut self, name: impl Into<String>) {
        let table = SymbolTable::new(name);
        debug!(scope = %table.name, depth = self.stack.len() + 1, "enter scope");
        self.stack.push(table);
    }

    pub fn exit_scope(&mut self) -> Result<SymbolTable, ScopeError> {
        let Some(table) = self.stack.pop() else {
            debug!("exit scope requested with no scope open");
            return Err(ScopeError::NoScope);
        };
        debug!(scope = %table.name, depth = self.stack.len(), "exit scope");
        Ok(table)
    }

    pub fn current_scope(&self) -> Option<&SymbolTable> {
        self.stack.last()
    }

    pub(crate) fn current_scope_mut(&mut self) -> Option<&mut SymbolTable> {
        self.stack.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.stack.iter().map(|table| table.name.as_str())
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Enter a scope that is exited again when the guard drops.
    pub fn scoped(&mut self, name: impl Into<String>) -> ScopeGuard<'_> {
        let base_depth = self.stack.len();
        self.enter_scope(name);
        ScopeGuard {
            tables: self,
            base_depth,
        }
    }
}

pub struct ScopeGuard<'a> {
    tables: &'a mut SymbolTables,
    base_depth: usize,
}

impl Deref for ScopeGuard<'_> {
    type Target = SymbolTables;

    fn deref(&self) -> &Self::Target {
        self.tables
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.tables
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        while self.tables.depth() > self.base_depth {
            if self.tables.exit_scope().is_err() {
                break;
            }
        }
    }
}
