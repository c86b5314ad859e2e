// 模組定義
pub mod config;
pub mod domain_types;
pub mod data_ingestion;
pub mod analytics;
pub mod views;
pub mod utils;
