pub mod check;
pub mod config;
pub mod exercise;
pub mod rules;
