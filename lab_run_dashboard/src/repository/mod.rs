pub mod qcodes_source_impl;
pub mod run_repository_impl;
