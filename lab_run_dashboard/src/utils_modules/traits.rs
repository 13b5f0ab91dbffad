use crate::common::*;

/* sqlite row → 도메인 타입 변환을 위한 공통 트레이트 */
pub trait FromSqliteRow
where
    Self: Sized,
{
    fn from_sqlite_row(row: &SqliteRow) -> Result<Self, anyhow::Error>;
}
