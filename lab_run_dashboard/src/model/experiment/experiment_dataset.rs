use crate::common::*;

use crate::model::table::data_table::*;

#[doc = r#"
    What the experiment source hands back for one run: all recorded samples
    as a table, and the run's parameter names as the comma-separated string
    the source stores them in.
"#]
#[derive(Debug, Clone, PartialEq, new)]
pub struct ExperimentDataset {
    table: DataTable,
    parameters: String,
}

impl ExperimentDataset {
    pub fn to_table(&self) -> &DataTable {
        &self.table
    }

    pub fn parameters(&self) -> &str {
        &self.parameters
    }
}
