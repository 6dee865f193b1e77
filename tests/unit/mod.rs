pub mod cache_tests;
pub mod config_tests;
pub mod error_tests;
pub mod schema_loader_tests;
