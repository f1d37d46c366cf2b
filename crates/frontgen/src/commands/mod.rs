pub mod audit;
pub mod docs;
pub mod mock;
pub mod rewrites;
