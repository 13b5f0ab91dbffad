use crate::common::*;

use crate::model::table::data_table::*;

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct LoadedDataset {
    run_id: i64,
    table: DataTable,
    parameters: Vec<String>,
}

#[doc = "Splits a comma-separated parameter list, trimming names and dropping empty entries"]
pub fn split_parameter_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
