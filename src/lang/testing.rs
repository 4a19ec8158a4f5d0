//! Scripted parser for unit tests.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::ast::ParsedStatement;
use crate::core::errors::{IntrospectError, Result};
use crate::lang::parser::QueryParser;

/// Parser that answers from a fixed script and rejects everything else.
#[derive(Debug, Default)]
pub struct ScriptedParser {
    trees: HashMap<String, Vec<Value>>,
    valid: HashSet<String>,
}

impl ScriptedParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parse(mut self, text: &str, statements: Vec<Value>) -> Self {
        self.trees.insert(text.to_string(), statements);
        self
    }

    pub fn with_valid(mut self, text: &str) -> Self {
        self.valid.insert(text.to_string());
        self
    }

    fn check(&self, text: &str) -> Result<()> {
        if self.valid.contains(text) || self.trees.contains_key(text) {
            Ok(())
        } else {
            Err(IntrospectError::parse_input(
                format!("Unexpected input: {text}"),
                text,
            ))
        }
    }
}

impl QueryParser for ScriptedParser {
    fn parse(&self, text: &str) -> Result<Vec<ParsedStatement>> {
        self.trees
            .get(text)
            .map(|statements| statements.iter().cloned().map(ParsedStatement::new).collect())
            .ok_or_else(|| {
                IntrospectError::parse_input(format!("Unexpected input: {text}"), text)
            })
    }

    fn format(&self, text: &str, pretty: bool) -> Result<String> {
        Ok(if pretty {
            format!("pretty:{text}")
        } else {
            text.to_string()
        })
    }

    fn validate(&self, text: &str) -> Result<()> {
        self.check(text)
    }

    fn validate_record_id(&self, text: &str) -> Result<()> {
        self.check(text)
    }

    fn validate_where(&self, text: &str) -> Result<()> {
        self.check(text)
    }
}
