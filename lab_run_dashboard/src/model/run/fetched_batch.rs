use crate::common::*;

use crate::model::{run::run_record::*, table::data_table::*, table::cell::*};

#[doc = r#"
    Result of one poll: the records with `id` above the requested watermark,
    ascending by id, and the watermark to use for the next poll.
"#]
#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct FetchedBatch {
    pub records: Vec<RunRecord>,
    pub watermark: i64,
}

const FIXED_COLUMNS: [&str; 3] = ["id", "timestamp", "parameters"];

#[doc = "Payload keys that would shadow a fixed column are renamed `data.<key>`"]
fn payload_column_name(key: String) -> String {
    if FIXED_COLUMNS.contains(&key.as_str()) {
        format!("data.{}", key)
    } else {
        key
    }
}

impl FetchedBatch {
    #[doc = "Max id of the records, or `last_index` unchanged when there are none"]
    pub fn from_records(records: Vec<RunRecord>, last_index: i64) -> Self {
        let watermark: i64 = records
            .iter()
            .map(|record| record.id)
            .max()
            .map_or(last_index, |max_id| max_id.max(last_index));

        FetchedBatch::new(records, watermark)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[doc = r#"
        Flattens the batch into a table with the columns `id`, `timestamp`,
        `parameters`, followed by every key found in the JSON payloads.
        A payload key equal to a fixed column lands in `data.<key>`.
    "#]
    pub fn to_table(&self) -> DataTable {
        let mut table: DataTable = DataTable::new();

        for column in FIXED_COLUMNS {
            table.ensure_column(column);
        }

        for record in &self.records {
            let mut row: Vec<(String, Cell)> = vec![
                ("id".to_string(), Cell::Int(record.id)),
                ("timestamp".to_string(), Cell::from(record.timestamp.clone())),
                ("parameters".to_string(), Cell::from(record.parameters.clone())),
            ];
            row.extend(
                record
                    .payload_fields()
                    .into_iter()
                    .map(|(key, cell)| (payload_column_name(key), cell)),
            );
            table.push_row(row);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, payload: &str) -> RunRecord {
        RunRecord::new(
            id,
            Some("2024-09-15 10:00:00".to_string()),
            Some("sweep".to_string()),
            Some(payload.as_bytes().to_vec()),
        )
    }

    #[test]
    fn empty_batch_keeps_watermark() {
        let batch: FetchedBatch = FetchedBatch::from_records(Vec::new(), 42);
        assert!(batch.is_empty());
        assert_eq!(*batch.watermark(), 42);
    }

    #[test]
    fn watermark_is_max_id() {
        let batch: FetchedBatch =
            FetchedBatch::from_records(vec![record(3, "{}"), record(7, "{}")], 2);
        assert_eq!(*batch.watermark(), 7);
    }

    #[test]
    fn table_has_fixed_columns_then_payload_keys() {
        let batch: FetchedBatch = FetchedBatch::from_records(
            vec![
                record(1, r#"{"voltage": 0.1}"#),
                record(2, r#"{"voltage": 0.2, "current": 1.5}"#),
            ],
            0,
        );

        let table: DataTable = batch.to_table();
        assert_eq!(
            table.column_names(),
            vec!["id", "timestamp", "parameters", "voltage", "current"]
        );
        assert_eq!(table.column("id").unwrap(), &[Cell::Int(1), Cell::Int(2)]);
        assert_eq!(
            table.column("current").unwrap(),
            &[Cell::Null, Cell::Float(1.5)]
        );
    }

    #[test]
    fn payload_keys_do_not_replace_fixed_columns() {
        let batch: FetchedBatch = FetchedBatch::from_records(
            vec![record(7, r#"{"id": "sweep-a", "parameters": "gate", "current": 1.0}"#)],
            0,
        );

        let table: DataTable = batch.to_table();
        assert_eq!(table.column("id").unwrap(), &[Cell::Int(7)]);
        assert_eq!(
            table.column("parameters").unwrap(),
            &[Cell::Text("sweep".to_string())]
        );
        assert_eq!(
            table.column("data.id").unwrap(),
            &[Cell::Text("sweep-a".to_string())]
        );
        assert_eq!(
            table.column("data.parameters").unwrap(),
            &[Cell::Text("gate".to_string())]
        );
        assert_eq!(table.column("current").unwrap(), &[Cell::Float(1.0)]);
    }

    #[test]
    fn empty_batch_table_still_has_fixed_columns() {
        let table: DataTable = FetchedBatch::from_records(Vec::new(), 0).to_table();
        assert!(table.is_empty());
        assert!(table.has_column("parameters"));
    }
}
