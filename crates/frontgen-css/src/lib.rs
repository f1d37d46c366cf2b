//! CSS custom-property auditor.
//!
//! Scans UI templates for `var(--name)` references and checks each one against a
//! reviewed allow-list, so new design tokens cannot slip in unnoticed.

pub mod allowlist;
pub mod audit;
pub mod scanner;

pub use allowlist::{AllowList, AllowListError};
pub use audit::{AuditReport, Unchecked};
pub use scanner::{find_variables, ScanError, VariableIndex, VariableScanner};
