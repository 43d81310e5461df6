use anyhow::Result;

use crate::config::{self, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let config_path = config::config_file_path();
    println!("Config file: {}", config_path.display());
    println!("File exists: {}\n", if config_path.exists() { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  exercises_path: {}", config.exercises_path.display());
    println!("  default_chapter: {}", config.default_chapter);
    println!("  perfect_score: {}", config.perfect_score);
    println!("  error_penalty: {}", config.error_penalty);
    println!("  log_level: {}", config.log_level);

    println!("\nPriority: CLI args > ENV vars (PARTSONG_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure partsong.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
