//! Boundary contracts for the services the editor consumes.
//!
//! Persistence, media lookup, the variable list and content generation all
//! live outside this crate. The engine and renderer only see these traits;
//! the host supplies implementations.

use uuid::Uuid;

use crate::doc::{Proposal, Variable};

/// Error returned by a collaborator.
#[derive(Debug, thiserror::Error)]
pub enum CollabError {
    /// The requested proposal does not exist.
    #[error("proposal not found: {0}")]
    NotFound(Uuid),
    /// The backing store failed to read or write.
    #[error("storage failure: {0}")]
    Storage(String),
    /// The payload could not be encoded or decoded.
    #[error("serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The service could not be reached or refused the request.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Loads and saves whole proposals. A saved proposal must load back unchanged.
pub trait Persistence {
    /// Store `proposal`, returning the stored copy.
    ///
    /// # Errors
    ///
    /// Returns a [`CollabError`] when the store rejects or fails the write.
    fn save(&self, proposal: &Proposal) -> Result<Proposal, CollabError>;

    /// Load the proposal with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CollabError::NotFound`] for unknown ids, or another variant
    /// when the store fails.
    fn load(&self, id: Uuid) -> Result<Proposal, CollabError>;
}

/// Resolves an image reference to a fetchable URL.
pub trait MediaResolver {
    /// The URL for `reference`, or `None` when it cannot be resolved.
    fn resolve(&self, reference: &str) -> Option<String>;
}

/// Passes references through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMedia;

impl MediaResolver for DirectMedia {
    fn resolve(&self, reference: &str) -> Option<String> {
        (!reference.is_empty()).then(|| reference.to_owned())
    }
}

/// Supplies the variables offered by the text surface and substituted at render time.
pub trait VariableSource {
    fn variables(&self) -> Vec<Variable>;
}

impl VariableSource for Vec<Variable> {
    fn variables(&self) -> Vec<Variable> {
        self.clone()
    }
}

/// Produces text for a prompt. The result is treated as opaque content.
pub trait ContentGenerator {
    /// Generate text for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns a [`CollabError`] when generation fails.
    fn generate(&self, prompt: &str) -> Result<String, CollabError>;
}
