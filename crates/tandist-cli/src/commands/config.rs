//! Show or initialize the configuration file.

use std::path::Path;

use anyhow::bail;
use clap::Args;
use tandist_config::{
    CONFIG_FILE_NAME, TanDistConfig, default_config_path, ensure_user_config_dir,
};

/// Show or initialize the configuration.
#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default configuration to the user config directory
    #[arg(long)]
    init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    force: bool,

    /// Print the user config file path and exit
    #[arg(long, conflicts_with = "init")]
    path: bool,
}

/// Run the config command.
pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    if args.path {
        println!("{}", default_config_path().display());
        return Ok(());
    }

    if args.init {
        let target = ensure_user_config_dir()?.join(CONFIG_FILE_NAME);
        if target.exists() && !args.force {
            bail!("{} already exists (use --force to overwrite)", target.display());
        }
        TanDistConfig::default().save(&target)?;
        tracing::info!(path = %target.display(), "wrote default configuration");
        println!("Wrote {}", target.display());
        return Ok(());
    }

    let config = TanDistConfig::load_or_default(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
