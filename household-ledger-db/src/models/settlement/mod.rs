pub mod settlement;
pub mod settlement_intent;

pub use settlement::*;
pub use settlement_intent::*;
