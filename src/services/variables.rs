//! Variable lists loaded from JSON files.
//!
//! DESIGN
//! ======
//! A variables file is either a full list of `{ "id", "name", "value" }`
//! records or a flat `{ "Name": "value" }` object. The flat form gets fresh
//! ids and is ordered by name so repeated loads list variables the same way.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use editor::collab::{CollabError, VariableSource};
use editor::doc::Variable;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum VariablesFile {
    List(Vec<Variable>),
    Map(BTreeMap<String, String>),
}

/// Variables read once from a file.
#[derive(Debug, Clone, Default)]
pub struct FileVariables {
    variables: Vec<Variable>,
}

impl FileVariables {
    /// Parse variables from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CollabError::Serialize`] when the text is neither accepted form.
    pub fn from_json(text: &str) -> Result<Self, CollabError> {
        let variables = match serde_json::from_str::<VariablesFile>(text)? {
            VariablesFile::List(list) => list,
            VariablesFile::Map(map) => map.into_iter().map(|(name, value)| Variable::new(name, value)).collect(),
        };
        Ok(Self { variables })
    }

    /// Read and parse a variables file.
    ///
    /// # Errors
    ///
    /// Returns [`CollabError::Storage`] if the file cannot be read, or
    /// [`CollabError::Serialize`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, CollabError> {
        let text = fs::read_to_string(path).map_err(|e| CollabError::Storage(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }
}

impl VariableSource for FileVariables {
    fn variables(&self) -> Vec<Variable> {
        self.variables.clone()
    }
}

#[cfg(test)]
#[path = "variables_test.rs"]
mod tests;
