pub mod attendance_service;
pub mod auth_service;
pub mod issue_service;
pub mod notifier;
pub mod schedule_service;
pub mod scoring_service;
