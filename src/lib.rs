//! 员工打卡与任务评分系统：排班比对迟到判定、每日任务评分与滚动平均、
//! 问题回报与通知。数据落在平面 CSV 表，经 store 层统一读写。

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;
