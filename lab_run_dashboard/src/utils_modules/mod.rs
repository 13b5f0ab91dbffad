pub mod io_utils;
pub mod logger_utils;
pub mod si_format;
pub mod sqlite_utils;
pub mod time_utils;
pub mod traits;
