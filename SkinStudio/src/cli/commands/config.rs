//! CLI command for the studio configuration

use std::path::Path;

use crate::Studio;

/// Print the resolved configuration, optionally saving it
pub fn show(studio: &Studio, config_path: Option<&Path>, save: bool) -> anyhow::Result<()> {
    let config = studio.config();
    print!("{}", toml::to_string_pretty(config)?);

    match config.resolved_mods_dir() {
        Some(dir) => println!("# archives go to {}", dir.display()),
        None => println!("# no mods directory; pass --output when building"),
    }

    if save {
        let Some(path) = config_path else {
            anyhow::bail!("No config location on this platform; pass --config");
        };
        config.save_to(path)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}
