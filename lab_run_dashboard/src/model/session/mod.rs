pub mod loaded_dataset;
pub mod session_state;
