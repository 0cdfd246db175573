pub mod analytics;
pub mod asset;
pub mod chart;
pub mod dashboard;
pub mod entity;
pub mod form;
pub mod insurance;
pub mod investment;
pub mod liability;
pub mod settings;
