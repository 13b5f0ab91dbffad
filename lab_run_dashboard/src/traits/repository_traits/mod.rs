pub mod experiment_source;
pub mod run_repository;
