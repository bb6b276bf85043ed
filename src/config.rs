//! # Repository Configuration
//!
//! A tiny INI-like file with a single `[user]` section holding `name` and
//! `email`. Kept as a hand-rolled parser rather than a general INI crate: the
//! format is small, and the writer must preserve any value it wasn't asked to
//! change (so re-running `config -n ...` doesn't clobber a previously set
//! email), which a generic round-trip library doesn't buy us much over.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::Repository;

/// The `[user]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub name: String,
    pub email: String,
}

impl Config {
    /// Load the config from `path`. A missing file parses to an all-empty
    /// config, matching the state right after `init`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self::default();
        let mut in_user_section = false;

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if trimmed.starts_with('[') {
                in_user_section = trimmed.trim_start_matches('[').trim_end_matches(']') == "user";
                continue;
            }

            if !in_user_section {
                continue;
            }

            if let Some((key, value)) = trimmed.split_once('=') {
                let key = key.trim();
                let value = value.trim();
                match key {
                    "name" => config.name = value.to_string(),
                    "email" => config.email = value.to_string(),
                    _ => {} // unrecognized keys are preserved only in spirit; we don't echo them back
                }
            }
        }

        Ok(config)
    }

    /// Write the config back out, tab-indented under `[user]` the way the
    /// original tool does.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = format!(
            "[user]\n\tname = {}\n\temail = {}\n",
            self.name, self.email
        );
        fs::write(path, content)?;
        Ok(())
    }

    /// Load, apply the given overrides (keeping existing values for `None`
    /// fields), and save.
    pub fn update(path: &Path, name: Option<&str>, email: Option<&str>) -> Result<Self> {
        let mut config = Self::load(path)?;
        if let Some(name) = name {
            config.name = name.to_string();
        }
        if let Some(email) = email {
            config.email = email.to_string();
        }
        config.save(path)?;
        Ok(config)
    }
}

/// Load the author identity configured for `repo`, as `(name, email)`.
pub fn author_identity(repo: &Repository) -> Result<(String, String)> {
    let config = Config::load(&repo.config_path())?;
    Ok((config.name, config.email))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().unwrap();
        let config = Config::load(&temp.path().join("config")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config");

        let config = Config {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_update_preserves_unset_field() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config");

        Config::update(&path, Some("Ada"), Some("ada@example.com")).unwrap();
        let updated = Config::update(&path, Some("Ada Lovelace"), None).unwrap();

        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.email, "ada@example.com");
    }
}
