use std::{fs, io::ErrorKind, path::Path};

use bon::Builder;
use clap::Args;
use log::{debug, info, trace};
use miette::{bail, Context, IntoDiagnostic, Result};
use siteforge_process_management::drivers::{
    opts::{BuildOpts, RunOpts},
    BuildDriver, ContainerDriver, Driver, DriverArgs, RunDriver,
};
use siteforge_utils::{
    cmd,
    constants::{PUBLIC_PATH, THEME_PATH},
    string_vec,
};

use crate::{config::SiteConfig, content::local_content};

use super::SiteForgeCommand;

#[derive(Debug, Clone, Copy, Default, Args, Builder)]
pub struct BuildCommand {
    #[clap(flatten)]
    #[builder(default)]
    drivers: DriverArgs,
}

impl SiteForgeCommand for BuildCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("BuildCommand::try_run()");

        Driver::init(self.drivers);

        let config = SiteConfig::from_env()?;

        prepare_site(&config)?;

        let pwd = std::env::current_dir().into_diagnostic()?;
        let content = local_content(&config, &pwd)?;
        let pwd_str = pwd.display().to_string();
        let volumes = content.volumes(&pwd_str);

        let args = string_vec!["--debug", "--verbose"];
        let opts = RunOpts::builder()
            .image(&config.image)
            .remove(true)
            .volumes(&volumes)
            .args(&args)
            .build();

        let status = Driver::run(&opts)
            .into_diagnostic()
            .context("Could not run the site generator")?;

        if !status.success() {
            bail!("Could not run the site generator");
        }

        info!("Site compiled into {PUBLIC_PATH}");
        Ok(())
    }
}

/// Removes the previous build output and any stale site
/// container, then builds the site image.
pub(crate) fn prepare_site(config: &SiteConfig) -> Result<()> {
    clean(config)?;
    build_image(config)
}

fn clean(config: &SiteConfig) -> Result<()> {
    trace!("clean()");

    match fs::remove_dir_all(PUBLIC_PATH) {
        Ok(()) => debug!("Removed {PUBLIC_PATH}"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e)
                .into_diagnostic()
                .with_context(|| format!("Could not remove {PUBLIC_PATH}"));
        }
    }

    Driver::remove_container(&config.container_name)
        .with_context(|| format!("Could not remove container {}", config.container_name))
}

fn build_image(config: &SiteConfig) -> Result<()> {
    trace!("build_image()");

    ensure_theme()?;

    Driver::build(
        &BuildOpts::builder()
            .image(&config.image)
            .containerfile(&config.containerfile)
            .build(),
    )
    .context("Could not build the site image")
}

/// Initializes the theme submodule on a fresh checkout.
fn ensure_theme() -> Result<()> {
    trace!("ensure_theme()");

    if Path::new(THEME_PATH).exists() {
        return Ok(());
    }

    info!("Initializing the {THEME_PATH} submodule");

    trace!("git submodule update --init --recursive --force");
    let status = cmd!("git", "submodule", "update", "--init", "--recursive", "--force")
        .status()
        .into_diagnostic()?;

    if !status.success() {
        bail!("Failed to initialize the {THEME_PATH} submodule");
    }
    Ok(())
}
