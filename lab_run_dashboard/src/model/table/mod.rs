pub mod cell;
pub mod data_table;
