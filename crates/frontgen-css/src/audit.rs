//! Cross-check of discovered variables against the allow-list.

use std::fmt;
use std::path::PathBuf;

use crate::allowlist::AllowList;
use crate::scanner::VariableIndex;

/// A variable that is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unchecked {
    pub name: String,
    pub sources: Vec<PathBuf>,
}

/// Outcome of an audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    /// Number of distinct variables found
    pub total: usize,

    /// Variables missing from the allow-list, sorted by name
    pub unchecked: Vec<Unchecked>,
}

impl AuditReport {
    /// Compare every indexed variable with the allow-list.
    pub fn new(index: &VariableIndex, allowed: &AllowList) -> Self {
        let unchecked = index
            .names()
            .filter(|name| !allowed.contains(name))
            .map(|name| Unchecked {
                name: name.to_string(),
                sources: index.sources_of(name).to_vec(),
            })
            .collect();

        Self {
            total: index.len(),
            unchecked,
        }
    }

    /// True when every variable is on the allow-list.
    pub fn is_clean(&self) -> bool {
        self.unchecked.is_empty()
    }
}

/// Human-readable report: the count, then each unchecked variable with its sources.
impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found {} CSS variables", self.total)?;
        for entry in &self.unchecked {
            writeln!(f, "Unchecked CSS variable: {}", entry.name)?;
            for source in &entry.sources {
                writeln!(f, "  from: {}", source.display())?;
            }
        }
        Ok(())
    }
}
