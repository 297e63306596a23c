//! Evolutionary events explaining an internal gene vertex.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event chosen for a (gene vertex, species vertex) pair.
///
/// Ordered by tie-break priority: on equal cost, speciation beats
/// duplication, which beats transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    /// Gene divergence coincides with the species divergence
    Speciation,
    /// Gene copies diverge within one species lineage
    Duplication,
    /// One gene copy moves to a non-ancestral species lineage
    Transfer,
}

impl Event {
    /// Lowercase name, as written in annotated Newick output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Speciation => "speciation",
            Event::Duplication => "duplication",
            Event::Transfer => "transfer",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
