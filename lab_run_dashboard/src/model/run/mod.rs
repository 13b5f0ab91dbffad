pub mod fetched_batch;
pub mod run_record;
