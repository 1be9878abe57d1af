use bon::Builder;
use clap::Args;
use log::{info, trace};
use miette::{bail, Context, IntoDiagnostic, Result};
use siteforge_process_management::drivers::{
    opts::{RunOpts, RunOptsPort},
    Driver, DriverArgs, RunDriver,
};
use siteforge_utils::{
    constants::{GENERATOR_PORT, PORT, READY_MARKER},
    string_vec,
};

use crate::{config::SiteConfig, content::local_content};

use super::{build::prepare_site, SiteForgeCommand};

#[derive(Debug, Clone, Copy, Args, Builder)]
pub struct PreviewCommand {
    /// The host port to bind the preview server to.
    #[arg(short, long, env = PORT, default_value_t = GENERATOR_PORT)]
    #[builder(default = GENERATOR_PORT)]
    port: u16,

    #[clap(flatten)]
    #[builder(default)]
    drivers: DriverArgs,
}

impl SiteForgeCommand for PreviewCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("PreviewCommand::try_run()");

        Driver::init(self.drivers);

        let config = SiteConfig::from_env()?;

        prepare_site(&config)?;

        let pwd = std::env::current_dir().into_diagnostic()?;
        let content = local_content(&config, &pwd)?;
        let pwd_str = pwd.display().to_string();
        let volumes = content.volumes(&pwd_str);

        let ports = [RunOptsPort::builder()
            .host(self.port)
            .container(GENERATOR_PORT)
            .build()];
        let args = string_vec![
            "server",
            "--debug",
            "--verbose",
            "--buildDrafts",
            "--buildFuture",
            "--noHTTPCache",
            "--watch",
            "--bind=0.0.0.0",
        ];
        let opts = RunOpts::builder()
            .image(&config.image)
            .name(&config.container_name)
            .detach(true)
            .volumes(&volumes)
            .ports(&ports)
            .args(&args)
            .build();

        let status = Driver::run(&opts)
            .into_diagnostic()
            .context("Could not run the website container")?;

        if !status.success() {
            bail!("Could not run the website container");
        }

        Driver::await_ready(&config.container_name, READY_MARKER)
            .context("Error waiting for the website to become ready")?;

        let url = format!("http://localhost:{}", self.port);
        info!("Opening {url}");
        open::that(&url)
            .into_diagnostic()
            .context("Could not open the website in a browser")?;

        Ok(())
    }
}
