use crate::error_handling::*;

use std::collections::HashMap;
use std::fmt;

/// Identifier to value bindings that live for the whole session.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    bindings: HashMap<String, f64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self{bindings: HashMap::new()}
    }

    pub fn get(&self, identifier: &str) -> Result<f64> {
        self.bindings
            .get(identifier)
            .copied()
            .ok_or_else(|| CalcError::undefined_identifier(identifier.into()))
    }

    pub fn set(&mut self, identifier: &str, value: f64) {
        self.bindings.insert(identifier.into(), value);
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.bindings.contains_key(identifier)
    }

    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self.bindings
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}
