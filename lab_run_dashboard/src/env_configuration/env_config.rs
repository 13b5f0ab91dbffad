use crate::common::*;

#[doc = r#"
    Reads an environment variable and treats a missing value as fatal.

    The dashboard cannot start without its configuration file, so a missing
    key is logged at error level and the process panics right away.

    # Arguments
    * `key` - name of the environment variable

    # Returns
    * `String` - the variable's value

    # Panics
    When the variable is not set
"#]
fn get_env_or_panic(key: &str) -> String {
    match env::var(key) {
        Ok(val) => val,
        Err(_) => {
            let msg = format!("[ENV file read Error] '{}' must be set", key);
            error!("{}", msg);
            panic!("{}", msg);
        }
    }
}

#[doc = r#"
    Path of the TOML server configuration, read from `SERVER_CONFIG_PATH`.

    The file carries the run mode and poll settings, the two sqlite file
    paths, the chart output settings and the experiment view inputs.
    Initialized on first access and cached afterwards.

    # Panics
    When `SERVER_CONFIG_PATH` is not set
"#]
pub static SERVER_CONFIG_PATH: once_lazy<String> =
    once_lazy::new(|| get_env_or_panic("SERVER_CONFIG_PATH"));
