pub mod adjustment_repository;
pub mod clock_repository;
pub mod issue_repository;
pub mod schedule_repository;
pub mod score_repository;
pub mod task_repository;
pub mod user_repository;
