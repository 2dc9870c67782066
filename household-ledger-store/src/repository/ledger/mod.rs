pub mod account_repository;
pub mod transaction_repository;
pub mod shared_expense_split_repository;

pub use account_repository::AccountRepositoryImpl;
pub use transaction_repository::TransactionRepositoryImpl;
pub use shared_expense_split_repository::SharedExpenseSplitRepositoryImpl;
