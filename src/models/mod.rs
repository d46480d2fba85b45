pub mod clock;
pub mod issue;
pub mod schedule;
pub mod score;
pub mod task;
pub mod user;
