pub mod identifiable;
pub mod document;
pub mod ledger;
pub mod settlement;
pub mod household;

// Re-exports
pub use identifiable::*;
pub use document::*;
