pub mod dashboard_service;
pub mod summary_service;
