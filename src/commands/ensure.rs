use clap::Args;
use log::{info, trace};
use miette::{bail, Result};
use siteforge_utils::check_command_exists;

use super::SiteForgeCommand;

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct EnsureCommand {}

impl SiteForgeCommand for EnsureCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("EnsureCommand::try_run()");

        check_command_exists("git")?;

        if check_command_exists("docker").is_err() && check_command_exists("podman").is_err() {
            bail!("Need either docker or podman installed to build the site");
        }

        info!("All required tools are installed");
        Ok(())
    }
}
