//! CLI configuration utilities

use anyhow::{Result, bail};
use forum_core::ClientConfig;
use std::path::Path;

/// Save client configuration as TOML
pub fn save_client_config<P: AsRef<Path>>(config: &ClientConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Generate a default configuration file, keeping an existing one unless `force`
pub fn generate_default_config<P: AsRef<Path>>(path: P, force: bool) -> Result<()> {
    let path = path.as_ref();
    if path.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite",
            path.display()
        );
    }
    save_client_config(&ClientConfig::default(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forum.toml");

        generate_default_config(&path, false).unwrap();
        let loaded = ClientConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.page_size, ClientConfig::default().page_size);
    }

    #[test]
    fn existing_config_is_kept_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forum.toml");
        std::fs::write(&path, "base_url = \"http://forum.test\"\n").unwrap();

        assert!(generate_default_config(&path, false).is_err());
        assert!(std::fs::read_to_string(&path).unwrap().contains("forum.test"));

        generate_default_config(&path, true).unwrap();
        assert!(!std::fs::read_to_string(&path).unwrap().contains("forum.test"));
    }
}
