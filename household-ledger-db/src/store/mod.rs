pub mod collection;
pub mod field_filter;
pub mod write_op;
pub mod ledger_store;

pub use collection::*;
pub use field_filter::*;
pub use write_op::*;
pub use ledger_store::*;
