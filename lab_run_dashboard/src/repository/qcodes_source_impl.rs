use crate::common::*;

use crate::model::{
    experiment::experiment_dataset::*,
    session::loaded_dataset::*,
    table::{cell::*, data_table::*},
};
use crate::traits::repository_traits::experiment_source::*;
use crate::utils_modules::sqlite_utils::*;

const SELECT_RUN_META: &str = r"
    SELECT result_table_name, parameters
    FROM runs
    WHERE run_id = ?;
";

#[doc = r#"
    Reads runs straight from a QCoDeS experiment database.

    QCoDeS keeps one row per run in `runs` (with the comma-separated
    `parameters` list and the name of the run's result table) and one
    table per run holding the samples, one column per parameter.
    The file is opened read-only.
"#]
#[derive(Debug, Clone)]
pub struct QcodesSourceImpl {
    db_path: PathBuf,
}

impl QcodesSourceImpl {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    async fn open(&self) -> anyhow::Result<SqliteConnection> {
        let options: SqliteConnectOptions = SqliteConnectOptions::new()
            .filename(&self.db_path)
            .read_only(true);

        options.connect().await.with_context(|| {
            format!(
                "[QcodesSourceImpl->open] Failed to open experiment database {:?}",
                self.db_path
            )
        })
    }
}

#[doc = "Double-quotes a sqlite identifier; result table names contain '-'"]
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[doc = "Flattens result rows into a table; with no rows the parameter names still become columns"]
fn rows_to_table(rows: &[SqliteRow], parameter_names: &[String]) -> anyhow::Result<DataTable> {
    let mut table: DataTable = DataTable::new();

    if let Some(first) = rows.first() {
        for column in first.columns() {
            table.ensure_column(column.name());
        }
    }

    for name in parameter_names {
        table.ensure_column(name);
    }

    for row in rows {
        let mut cells: Vec<(String, Cell)> = Vec::with_capacity(row.len());

        for (idx, column) in row.columns().iter().enumerate() {
            cells.push((column.name().to_string(), decode_cell(row, idx)?));
        }

        table.push_row(cells);
    }

    Ok(table)
}

#[async_trait]
impl ExperimentSource for QcodesSourceImpl {
    async fn load_by_id(&self, run_id: i64) -> anyhow::Result<Option<ExperimentDataset>> {
        let mut conn: SqliteConnection = self.open().await?;

        let meta: Option<SqliteRow> = sqlx::query(SELECT_RUN_META)
            .bind(run_id)
            .fetch_optional(&mut conn)
            .await
            .with_context(|| {
                format!(
                    "[QcodesSourceImpl->load_by_id] Failed to look up run {}",
                    run_id
                )
            })?;

        let Some(meta) = meta else {
            conn.close().await?;
            return Ok(None);
        };

        let result_table_name: String = meta
            .try_get("result_table_name")
            .context("[QcodesSourceImpl->load_by_id] Missing or invalid 'result_table_name'")?;
        let parameters: String = meta
            .try_get::<Option<String>, _>("parameters")
            .context("[QcodesSourceImpl->load_by_id] Missing or invalid 'parameters'")?
            .unwrap_or_default();

        let select_samples: String = format!("SELECT * FROM {}", quote_identifier(&result_table_name));

        let rows: Vec<SqliteRow> = sqlx::query(&select_samples)
            .fetch_all(&mut conn)
            .await
            .with_context(|| {
                format!(
                    "[QcodesSourceImpl->load_by_id] Failed to read result table '{}'",
                    result_table_name
                )
            })?;

        conn.close().await?;

        let table: DataTable = rows_to_table(&rows, &split_parameter_list(&parameters))?;

        debug!(
            "run {} loaded from '{}': {} rows",
            run_id,
            result_table_name,
            table.row_count()
        );

        Ok(Some(ExperimentDataset::new(table, parameters)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn qcodes_fixture(dir: &tempfile::TempDir) -> PathBuf {
        let path: PathBuf = dir.path().join("experiments.db");
        let mut conn: SqliteConnection = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .connect()
            .await
            .unwrap();

        for statement in [
            r"CREATE TABLE runs (
                run_id INTEGER PRIMARY KEY AUTOINCREMENT,
                exp_id INTEGER,
                name TEXT,
                result_table_name TEXT,
                parameters TEXT
            );",
            r#"CREATE TABLE "results-1-1" (
                id INTEGER PRIMARY KEY,
                voltage REAL,
                current REAL,
                label TEXT
            );"#,
            r#"CREATE TABLE "results-1-2" (id INTEGER PRIMARY KEY, gate REAL);"#,
            r#"INSERT INTO runs (exp_id, name, result_table_name, parameters)
               VALUES (1, 'iv', 'results-1-1', 'voltage,current');"#,
            r#"INSERT INTO runs (exp_id, name, result_table_name, parameters)
               VALUES (1, 'empty', 'results-1-2', 'gate');"#,
            r#"INSERT INTO "results-1-1" (voltage, current, label) VALUES
               (0.0, 0.0, 'a'), (0.5, 1.0, NULL), (1.0, 2.0, 'c');"#,
        ] {
            sqlx::query(statement).execute(&mut conn).await.unwrap();
        }

        conn.close().await.unwrap();
        path
    }

    #[tokio::test]
    async fn loads_samples_and_parameter_list() {
        let dir = tempfile::tempdir().unwrap();
        let source: QcodesSourceImpl = QcodesSourceImpl::new(qcodes_fixture(&dir).await);

        let dataset: ExperimentDataset = source.load_by_id(1).await.unwrap().unwrap();
        assert_eq!(dataset.parameters(), "voltage,current");

        let table: &DataTable = dataset.to_table();
        assert_eq!(table.column_names(), vec!["id", "voltage", "current", "label"]);
        assert_eq!(
            table.column("current").unwrap(),
            &[Cell::Float(0.0), Cell::Float(1.0), Cell::Float(2.0)]
        );
        assert_eq!(table.column("label").unwrap()[1], Cell::Null);
    }

    #[tokio::test]
    async fn empty_result_table_keeps_parameter_columns() {
        let dir = tempfile::tempdir().unwrap();
        let source: QcodesSourceImpl = QcodesSourceImpl::new(qcodes_fixture(&dir).await);

        let dataset: ExperimentDataset = source.load_by_id(2).await.unwrap().unwrap();
        assert!(dataset.to_table().is_empty());
        assert!(dataset.to_table().has_column("gate"));
    }

    #[tokio::test]
    async fn unknown_run_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let source: QcodesSourceImpl = QcodesSourceImpl::new(qcodes_fixture(&dir).await);

        assert!(source.load_by_id(99).await.unwrap().is_none());
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_identifier("results-1-1"), "\"results-1-1\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
