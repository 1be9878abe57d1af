use bon::Builder;
use clap::Args;
use log::trace;
use miette::{bail, Context, IntoDiagnostic, Result};
use siteforge_process_management::drivers::{opts::RunOpts, Driver, DriverArgs, RunDriver};
use siteforge_utils::string_vec;

use crate::{config::SiteConfig, content::local_content};

use super::SiteForgeCommand;

#[derive(Debug, Clone, Copy, Default, Args, Builder)]
pub struct ShellCommand {
    #[clap(flatten)]
    #[builder(default)]
    drivers: DriverArgs,
}

impl SiteForgeCommand for ShellCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("ShellCommand::try_run()");

        Driver::init(self.drivers);

        let config = SiteConfig::from_env()?;

        let pwd = std::env::current_dir().into_diagnostic()?;
        let content = local_content(&config, &pwd)?;
        let pwd_str = pwd.display().to_string();
        let volumes = content.volumes(&pwd_str);

        let args = string_vec!["shell"];
        let opts = RunOpts::builder()
            .image(&config.image)
            .interactive(true)
            .remove(true)
            .volumes(&volumes)
            .args(&args)
            .build();

        let status = Driver::run(&opts)
            .into_diagnostic()
            .context("Could not start a shell in the site container")?;

        if !status.success() {
            bail!("Could not start a shell in the site container");
        }
        Ok(())
    }
}
