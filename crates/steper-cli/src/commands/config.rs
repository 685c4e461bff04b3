use anyhow::Result;

use steper_core::AppConfig;

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let config_path = AppConfig::config_path();

    if config_path.exists() && !force {
        println!("Configuration already exists at {}", config_path.display());
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    AppConfig::default().save()?;
    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    println!("# {}", AppConfig::config_path().display());
    print!("{}", content);
    Ok(())
}
