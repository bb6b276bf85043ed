//! # Config Command
//!
//! Set the author identity used for commits.
//!
//! ## Usage
//!
//! ```bash
//! gitingo config -n "Ada Lovelace"
//! gitingo config -e ada@example.com
//! gitingo config -n "Ada Lovelace" -e ada@example.com
//! ```

use anyhow::{Context, Result};

use gitingo::config::Config;
use gitingo::Repository;

pub fn run(name: Option<String>, email: Option<String>) -> Result<()> {
    let repo = Repository::find().context("not a gitingo repository")?;

    if name.is_none() && email.is_none() {
        let config = Config::load(&repo.config_path())?;
        println!("user.name = {}", config.name);
        println!("user.email = {}", config.email);
        return Ok(());
    }

    Config::update(&repo.config_path(), name.as_deref(), email.as_deref())
        .context("failed to update config")?;

    Ok(())
}
