//! API descriptor tooling for frontgen.
//!
//! Loads the JSON endpoint descriptors that live next to the front-end's API layer and
//! turns them into a Markdown reference document or a set of hosting rewrite rules.

pub mod descriptor;
pub mod markdown;
pub mod priority;
pub mod rewrites;

pub use descriptor::{load_descriptors, ApiDescriptor, DescriptorError};
pub use markdown::{top_level_segment, DocBuilder, DocConfig, DocError, DocResult};
pub use priority::PriorityTable;
pub use rewrites::{
    normalize_backend, resolve_backend, RewriteConfig, RewriteError, RewriteRule, SPA_ENTRY,
    SPA_FALLBACK_SOURCE,
};
