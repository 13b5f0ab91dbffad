use crate::common::*;

const LOG_DIRECTORY: &str = "logs";
const LOG_BASENAME: &str = "lab_run_dashboard";

#[doc = "Line format shared by the file and stdout writers"]
fn custom_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] [{}:{}] {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        record.file().unwrap_or("<unknown>"),
        record.line().unwrap_or(0),
        record.args()
    )
}

#[doc = r#"
    Initializes the global logger.

    The log spec is taken from `RUST_LOG` and falls back to `info`.
    Files go to `logs/`, rotate daily and the ten newest files are kept.
    Every line is duplicated to stdout.

    The returned handle has to stay alive until the program ends, otherwise
    the file writer is flushed and closed early.
"#]
pub fn set_global_logger() -> anyhow::Result<LoggerHandle> {
    let handle: LoggerHandle = Logger::try_with_env_or_str("info")
        .context("[set_global_logger] Invalid log specification")?
        .log_to_file(
            FileSpec::default()
                .directory(LOG_DIRECTORY)
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(10),
        )
        .format_for_files(custom_format)
        .format_for_stdout(custom_format)
        .duplicate_to_stdout(Duplicate::All)
        .start()
        .context("[set_global_logger] Failed to start the logger")?;

    Ok(handle)
}
