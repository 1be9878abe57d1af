use std::process::ExitStatus;

use log::{error, info, trace};
use miette::{bail, IntoDiagnostic, Result};
use semver::Version;
use serde::Deserialize;
use siteforge_utils::{cmd, collapse_args, string, string_vec};

use super::{
    opts::{BuildOpts, RunOpts},
    BuildDriver, ContainerDriver, DriverVersion, RunDriver,
};

#[derive(Debug, Deserialize)]
struct PodmanVersionJsonClient {
    #[serde(alias = "Version")]
    pub version: Version,
}

#[derive(Debug, Deserialize)]
struct PodmanVersionJson {
    #[serde(alias = "Client")]
    pub client: PodmanVersionJsonClient,
}

#[derive(Debug)]
pub struct PodmanDriver;

impl DriverVersion for PodmanDriver {
    // First podman version to support the rootless flags we rely on
    // https://github.com/containers/podman/blob/main/RELEASE_NOTES.md#400
    const VERSION_REQ: &'static str = ">=4";

    fn version() -> Result<Version> {
        trace!("PodmanDriver::version()");

        trace!("podman version -f json");
        let output = cmd!("podman", "version", "-f", "json")
            .output()
            .into_diagnostic()?;

        let version_json: PodmanVersionJson = serde_json::from_slice(&output.stdout)
            .inspect_err(|e| error!("{e}: {}", String::from_utf8_lossy(&output.stdout)))
            .into_diagnostic()?;

        Ok(version_json.client.version)
    }
}

impl BuildDriver for PodmanDriver {
    fn build(opts: &BuildOpts) -> Result<()> {
        trace!("PodmanDriver::build({opts:#?})");

        let mut command = cmd!(
            "podman",
            "build",
            "-f",
            opts.containerfile.as_ref(),
            "-t",
            opts.image.as_ref(),
            ".",
        );

        trace!("{command:?}");
        let status = command.status().into_diagnostic()?;

        if status.success() {
            info!("Successfully built {}", opts.image);
        } else {
            bail!("Failed to build {}", opts.image);
        }
        Ok(())
    }
}

impl RunDriver for PodmanDriver {
    fn run(opts: &RunOpts) -> std::io::Result<ExitStatus> {
        trace!("PodmanDriver::run({opts:#?})");

        let args = run_args(opts);

        trace!("podman {}", args.join(" "));
        let mut command = cmd!("podman");
        command.args(args);

        command.status()
    }
}

impl ContainerDriver for PodmanDriver {
    fn container_exists(name: &str) -> Result<bool> {
        trace!("PodmanDriver::container_exists({name})");

        trace!("podman ps --all --filter=name={name} --format={{{{.Names}}}}");
        let output = cmd!(
            "podman",
            "ps",
            "--all",
            format!("--filter=name={name}"),
            "--format={{.Names}}",
        )
        .output()
        .into_diagnostic()?;

        if !output.status.success() {
            bail!(
                "Failed to list containers: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        let names = String::from_utf8(output.stdout).into_diagnostic()?;
        Ok(names.lines().any(|line| line == name))
    }

    fn force_remove_container(name: &str) -> Result<()> {
        trace!("PodmanDriver::force_remove_container({name})");

        trace!("podman rm -f {name}");
        let status = cmd!("podman", "rm", "-f", name).status().into_diagnostic()?;

        if !status.success() {
            bail!("Failed to remove container {name}");
        }
        Ok(())
    }

    fn container_logs(name: &str) -> Result<String> {
        trace!("PodmanDriver::container_logs({name})");

        let output = cmd!("podman", "logs", name).output().into_diagnostic()?;

        if !output.status.success() {
            bail!(
                "Failed to get logs for container {name}: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        String::from_utf8(output.stdout).into_diagnostic()
    }
}

fn run_args(opts: &RunOpts) -> Vec<String> {
    collapse_args![
        "run",
        opts.name.map(|name| format!("--name={name}")),
        opts.remove.then(|| string!("--rm")),
        opts.detach.then(|| string!("--detach")),
        opts.interactive.then(|| string_vec!["--interactive", "--tty"]),
        opts.entrypoint
            .map(|entrypoint| format!("--entrypoint={entrypoint}")),
        opts.volumes
            .iter()
            .map(|volume| {
                format!(
                    "--volume={}:{}",
                    volume.path_or_vol_name, volume.container_path
                )
            })
            .collect::<Vec<_>>(),
        opts.ports
            .iter()
            .map(|port| format!("--publish={}:{}", port.host, port.container))
            .collect::<Vec<_>>(),
        opts.image,
        opts.args.to_vec(),
    ]
}
