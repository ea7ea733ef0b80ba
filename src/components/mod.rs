pub mod app;
pub mod dashboard;
pub mod insights;
pub mod risk_distribution;
pub mod sidebar;
pub mod skeleton;
pub mod upload;
