pub mod alerts_model;
pub mod alerts_repository;
pub mod alerts_service;

pub use alerts_model::{rule_matches, AlertRule, AlertTrigger, NewAlertRule};
pub use alerts_repository::{AlertsRepository, AlertsRepositoryTrait};
pub use alerts_service::AlertsService;
