pub mod badges;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod telemetry;
