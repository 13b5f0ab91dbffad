use crate::common::*;

use crate::model::table::cell::*;
use crate::utils_modules::{sqlite_utils::*, traits::*};

#[doc = r#"
    One row of the monitor `runs` table.

    # Fields
    * `id` - primary key assigned by sqlite, strictly increasing; used as the polling watermark
    * `timestamp` - DATETIME column, kept as the stored text
    * `parameters` - free-form description of the run
    * `data` - opaque payload; a JSON object payload is exposed as extra table columns
"#]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct RunRecord {
    pub id: i64,
    pub timestamp: Option<String>,
    pub parameters: Option<String>,
    pub data: Option<Vec<u8>>,
}

impl RunRecord {
    #[doc = "Fields of the payload when it is a JSON object, in key order; empty otherwise"]
    pub fn payload_fields(&self) -> Vec<(String, Cell)> {
        let Some(bytes) = self.data.as_deref() else {
            return Vec::new();
        };

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| (key.clone(), Cell::from_json(value)))
                .collect(),
            _ => {
                debug!(
                    "[RunRecord->payload_fields] run {} payload is not a JSON object",
                    self.id
                );
                Vec::new()
            }
        }
    }
}

impl FromSqliteRow for RunRecord {
    fn from_sqlite_row(row: &SqliteRow) -> Result<Self, anyhow::Error> {
        let id: i64 = row
            .try_get("id")
            .context("[RunRecord->from_sqlite_row] Missing or invalid 'id'")?;
        /* DATETIME 컬럼은 숫자(julianday, epoch)로 저장될 수도 있음 */
        let timestamp: Option<String> = match decode_cell(row, "timestamp")
            .context("[RunRecord->from_sqlite_row] Missing or invalid 'timestamp'")?
        {
            Cell::Null => None,
            cell => Some(cell.to_string()),
        };
        let parameters: Option<String> = row
            .try_get("parameters")
            .context("[RunRecord->from_sqlite_row] Missing or invalid 'parameters'")?;
        let data: Option<Vec<u8>> = row
            .try_get("data")
            .context("[RunRecord->from_sqlite_row] Missing or invalid 'data'")?;

        Ok(RunRecord::new(id, timestamp, parameters, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_payload_is_flattened() {
        let record: RunRecord = RunRecord::new(
            1,
            None,
            None,
            Some(br#"{"voltage": 0.5, "current": 2}"#.to_vec()),
        );

        let fields: Vec<(String, Cell)> = record.payload_fields();
        assert!(fields.contains(&("voltage".to_string(), Cell::Float(0.5))));
        assert!(fields.contains(&("current".to_string(), Cell::Int(2))));
    }

    #[test]
    fn opaque_payload_has_no_fields() {
        let binary: RunRecord = RunRecord::new(1, None, None, Some(vec![0xde, 0xad]));
        let array: RunRecord = RunRecord::new(2, None, None, Some(b"[1,2]".to_vec()));
        let empty: RunRecord = RunRecord::new(3, None, None, None);

        assert!(binary.payload_fields().is_empty());
        assert!(array.payload_fields().is_empty());
        assert!(empty.payload_fields().is_empty());
    }
}
