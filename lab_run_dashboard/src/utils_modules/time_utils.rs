use crate::common::*;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

#[doc = "현재 로컬 시각을 sqlite DATETIME 호환 문자열로 반환해주는 함수"]
pub fn get_current_local_naivedatetime_str() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[doc = r#"
    Parses a timestamp string into seconds since the unix epoch.

    Accepts RFC 3339 strings and the naive `YYYY-MM-DD HH:MM:SS[.fff]` forms
    sqlite writes for DATETIME columns (naive values are read as UTC).
    Returns `None` when the text is not a timestamp.
"#]
pub fn parse_timestamp_secs(text: &str) -> Option<f64> {
    let trimmed: &str = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(to_secs(dt.with_timezone(&Utc)));
    }

    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(trimmed, fmt)
            .ok()
            .map(|naive| to_secs(naive.and_utc()))
    })
}

fn to_secs(dt: DateTime<Utc>) -> f64 {
    dt.timestamp_millis() as f64 / 1000.0
}
