use crate::error_handling::*;
use crate::parsing::*;
use crate::scanning::*;
use crate::symbols::*;

use log::{debug, warn};
use std::fmt;

pub struct Report {
    pub tokens: Vec<String>,
    pub read: Vec<String>,
    pub unread: Vec<String>,
    pub outcome: Result<Option<f64>>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.outcome {
            Ok(Some(value)) => writeln!(f, "Value: {}", value)?,
            Ok(None) => writeln!(f, "Statement successfully assigned")?,
            Err(e) => writeln!(f, "parse error: {}", e)?,
        }
        if !self.unread.is_empty() {
            writeln!(f, "Syntax error:")?;
        }
        write!(f, "read | un-read: {} | {}", self.read.join(" "), self.unread.join(" "))
    }
}

/// One interactive session; the symbol table outlives every statement.
#[derive(Default)]
pub struct Session {
    symbols: SymbolTable,
}

impl Session {
    pub fn new() -> Self {
        Self{symbols: SymbolTable::new()}
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn execute(&mut self, line: &str) -> Report {
        let mut tokens = tokenize(line);
        debug!("token stream: {:?}", tokens.tokens());

        let outcome = evaluate_statement(&mut tokens, &mut self.symbols);
        match &outcome {
            Ok(Some(value)) if !value.is_finite() => warn!("'{}' evaluated to {}", line.trim(), value),
            Ok(_) => (),
            Err(e) => debug!("statement failed at token {}: {}", tokens.position(), e),
        }

        Report {
            tokens: tokens.tokens().to_vec(),
            read: tokens.read().to_vec(),
            unread: tokens.unread().to_vec(),
            outcome,
        }
    }
}
