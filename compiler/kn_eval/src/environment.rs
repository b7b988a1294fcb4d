//! Global variable table.
//!
//! Knight has a single, flat namespace. Every identifier maps to exactly one
//! [`Variable`] cell for the life of the [`Environment`]; the parser resolves
//! names to a [`VarId`] once, and evaluation indexes the cell directly.
//!
//! Cells live in a `Vec` and are never removed, so a `VarId` stays valid
//! for as long as its environment exists.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Handle to a variable cell, stable for the life of its environment.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(u32);

impl VarId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarId({})", self.0)
    }
}

/// A named cell; unassigned until the first `=`.
#[derive(Clone, Debug)]
pub struct Variable {
    name: Rc<str>,
    value: Option<Value>,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_assigned(&self) -> bool {
        self.value.is_some()
    }
}

/// Identifier table for one interpreter.
#[derive(Default)]
pub struct Environment {
    cells: Vec<Variable>,
    by_name: FxHashMap<Rc<str>, VarId>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell for `name`, created unassigned on first sight.
    pub fn lookup_or_create(&mut self, name: &str) -> VarId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let name: Rc<str> = Rc::from(name);
        // More than u32::MAX distinct identifiers cannot fit in memory as source text.
        let id = VarId(u32::try_from(self.cells.len()).unwrap_or(u32::MAX));
        self.cells.push(Variable {
            name: Rc::clone(&name),
            value: None,
        });
        self.by_name.insert(name, id);
        tracing::trace!(name = %self.cells[id.index()].name, ?id, "new variable");
        id
    }

    /// The cell for `name`, if it has been seen.
    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.by_name.get(name).copied()
    }

    /// Current value of a cell; `None` while unassigned.
    #[inline]
    pub fn value(&self, id: VarId) -> Option<&Value> {
        self.cells.get(id.index()).and_then(Variable::value)
    }

    /// Name of a cell, `"?"` for a handle from another environment.
    pub fn name(&self, id: VarId) -> &str {
        self.cells.get(id.index()).map_or("?", Variable::name)
    }

    /// Replace a cell's value wholesale.
    ///
    /// Handles from another environment are ignored.
    pub fn assign(&mut self, id: VarId, value: Value) {
        if let Some(cell) = self.cells.get_mut(id.index()) {
            cell.value = Some(value);
        }
    }

    /// Number of distinct identifiers seen.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.cells.iter()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.cells.iter().map(|c| (c.name(), c.value())))
            .finish()
    }
}
