//! Initialize a new Shibboleth project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::Config;

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = path
        .map(|p| Path::new(&p).to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap());

    println!("{} Initializing Shibboleth project...", "→".blue());

    // Create .shibboleth directory
    let data_dir = base_path.join(".shibboleth");
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    println!("  {} Created {}", "✓".green(), data_dir.display());

    // Create default config
    let config_path = base_path.join("shibboleth.toml");
    if !config_path.exists() {
        let config = Config::default();
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    // Create .gitignore for .shibboleth
    let gitignore_path = data_dir.join(".gitignore");
    if !gitignore_path.exists() {
        std::fs::write(&gitignore_path, "*\n")?;
        println!("  {} Created {}", "✓".green(), gitignore_path.display());
    }

    println!();
    println!("{} Shibboleth project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} shibboleth insert <words>", "1.".blue());
    println!("  {} shibboleth challenge", "2.".blue());
    println!("  {} shibboleth respond <word>", "3.".blue());

    Ok(())
}
