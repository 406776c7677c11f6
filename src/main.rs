use anyhow::{Context, Result};
use clap::Parser;
use refind_theme_builder::cli::{Cli, Commands};
use refind_theme_builder::theme;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let layout = cli.layout();

    match &cli.command {
        Commands::Build(args) => {
            let options = args.options().context("Invalid build options")?;
            let report = theme::build(&layout, &options)
                .with_context(|| format!("Failed to build {}", layout.name))?;
            log::info!(
                "{} file(s) written to {}",
                report.written.len(),
                layout.build.display()
            );
        }
        Commands::Clean => {
            let removed = theme::clean(&layout)
                .with_context(|| format!("Failed to clean {}", layout.build.display()))?;
            if !removed {
                log::info!("nothing to clean");
            }
        }
    }

    Ok(())
}
