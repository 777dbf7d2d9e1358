pub mod transactions_model;
pub mod transactions_repository;
pub mod transactions_service;

pub use transactions_model::{NewTransaction, TransactionKind, TransactionRecord};
pub use transactions_repository::{TransactionsRepository, TransactionsRepositoryTrait};
pub use transactions_service::TransactionsService;
