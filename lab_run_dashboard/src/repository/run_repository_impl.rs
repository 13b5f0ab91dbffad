use crate::common::*;

use crate::model::run::run_record::*;
use crate::traits::repository_traits::run_repository::*;
use crate::utils_modules::{io_utils::*, traits::*};

const CREATE_RUNS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS runs (
        id INTEGER PRIMARY KEY,
        timestamp DATETIME,
        parameters TEXT,
        data BLOB
    );
";

const SELECT_RUNS_AFTER: &str = r"
    SELECT id, timestamp, parameters, data
    FROM runs
    WHERE id > ?
    ORDER BY id ASC;
";

#[cfg(test)]
const INSERT_RUN: &str = r"
    INSERT INTO runs (timestamp, parameters, data) VALUES (?, ?, ?);
";

#[doc = r#"
    sqlite access to the monitor `runs` table.

    No connection is held: every operation opens the file, runs a single
    statement and closes the connection again.
"#]
#[derive(Debug, Clone)]
pub struct RunRepositoryImpl {
    db_path: PathBuf,
}

impl RunRepositoryImpl {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    async fn open(&self) -> anyhow::Result<SqliteConnection> {
        let options: SqliteConnectOptions = SqliteConnectOptions::new()
            .filename(&self.db_path)
            .create_if_missing(true);

        options.connect().await.with_context(|| {
            format!(
                "[RunRepositoryImpl->open] Failed to open sqlite file {:?}",
                self.db_path
            )
        })
    }

    #[cfg(test)]
    pub async fn insert_run(
        &self,
        timestamp: &str,
        parameters: &str,
        data: &[u8],
    ) -> anyhow::Result<i64> {
        let mut conn: SqliteConnection = self.open().await?;

        let result = sqlx::query(INSERT_RUN)
            .bind(timestamp)
            .bind(parameters)
            .bind(data)
            .execute(&mut conn)
            .await
            .context("[RunRepositoryImpl->insert_run] Failed to insert run")?;

        conn.close().await?;

        Ok(result.last_insert_rowid())
    }
}

#[async_trait]
impl RunRepository for RunRepositoryImpl {
    async fn init_schema(&self) -> anyhow::Result<()> {
        ensure_parent_dir(&self.db_path).await?;

        let mut conn: SqliteConnection = self.open().await?;

        sqlx::query(CREATE_RUNS_TABLE)
            .execute(&mut conn)
            .await
            .context("[RunRepositoryImpl->init_schema] Failed to create 'runs' table")?;

        conn.close().await?;

        info!("'runs' table is ready in {:?}", self.db_path);
        Ok(())
    }

    async fn fetch_runs_after(&self, last_index: i64) -> anyhow::Result<Vec<RunRecord>> {
        let mut conn: SqliteConnection = self.open().await?;

        let rows: Vec<SqliteRow> = sqlx::query(SELECT_RUNS_AFTER)
            .bind(last_index)
            .fetch_all(&mut conn)
            .await
            .with_context(|| {
                format!(
                    "[RunRepositoryImpl->fetch_runs_after] Query failed for id > {}",
                    last_index
                )
            })?;

        conn.close().await?;

        rows.iter().map(RunRecord::from_sqlite_row).collect()
    }
}
