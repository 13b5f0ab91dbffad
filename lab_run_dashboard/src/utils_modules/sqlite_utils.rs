use crate::common::*;

use crate::model::table::cell::*;

#[doc = r#"
    Decodes one cell by the storage class of the stored value rather than the
    declared column type; sqlite column affinity does not pin the value type.
    Blobs are not tabular and decode to `Cell::Null`.
"#]
pub fn decode_cell<I>(row: &SqliteRow, index: I) -> anyhow::Result<Cell>
where
    I: ColumnIndex<SqliteRow> + Copy,
{
    let type_name: String = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Cell::Null);
        }
        raw.type_info().name().to_ascii_uppercase()
    };

    let cell: Cell = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => Cell::Int(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" | "NUMERIC" => Cell::Float(row.try_get_unchecked::<f64, _>(index)?),
        "TEXT" | "DATETIME" | "DATE" | "TIME" => {
            Cell::Text(row.try_get_unchecked::<String, _>(index)?)
        }
        _ => Cell::Null,
    };

    Ok(cell)
}
