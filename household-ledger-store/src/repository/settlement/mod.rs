pub mod settlement_repository;
pub mod settlement_intent_repository;

pub use settlement_repository::SettlementRepositoryImpl;
pub use settlement_intent_repository::SettlementIntentRepositoryImpl;
