use crate::common::*;

#[doc = r#"
    Reads a TOML file and deserializes it into the requested structure.

    Used for the server configuration (`SERVER_CONFIG_PATH`).

    # Arguments
    * `file_path` - path of the TOML file

    # Returns
    * `Result<T, anyhow::Error>` - the parsed structure

    # Errors
    - the file does not exist or cannot be read
    - the content is not valid TOML or does not match `T`
"#]
pub fn read_toml_from_file<T: DeserializeOwned>(file_path: &str) -> Result<T, anyhow::Error> {
    let toml_content: String = std::fs::read_to_string(file_path)
        .with_context(|| format!("[read_toml_from_file] Failed to read '{}'", file_path))?;
    let toml: T = toml::from_str(&toml_content)
        .with_context(|| format!("[read_toml_from_file] Failed to parse '{}'", file_path))?;

    Ok(toml)
}

#[doc = "Creates the parent directory of `path` if it does not exist yet"]
pub async fn ensure_parent_dir(path: &Path) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("[ensure_parent_dir] Failed to create directory {:?}", parent)
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn reads_toml_into_struct() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.toml");
        std::fs::write(&path, "name = \"runs\"\ncount = 3\n").unwrap();

        let sample: Sample = read_toml_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(sample.name, "runs");
        assert_eq!(sample.count, 3);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result: anyhow::Result<Sample> = read_toml_from_file("/definitely/not/here.toml");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn creates_nested_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("charts/live/scatter.png");

        ensure_parent_dir(&target).await.unwrap();
        assert!(dir.path().join("charts/live").is_dir());
    }
}
