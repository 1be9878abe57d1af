use std::process::ExitStatus;

use log::{info, trace};
use miette::{bail, IntoDiagnostic, Result};
use semver::Version;
use serde::Deserialize;
use siteforge_utils::{cmd, collapse_args, string, string_vec};

use super::{
    opts::{BuildOpts, RunOpts},
    BuildDriver, ContainerDriver, DriverVersion, RunDriver,
};

#[derive(Debug, Deserialize)]
struct DockerVersionJsonClient {
    #[serde(alias = "Version")]
    pub version: Version,
}

#[derive(Debug, Deserialize)]
struct DockerVersionJson {
    #[serde(alias = "Client")]
    pub client: DockerVersionJsonClient,
}

#[derive(Debug)]
pub struct DockerDriver;

impl DriverVersion for DockerDriver {
    // First docker version with a stable `version -f json`
    const VERSION_REQ: &'static str = ">=23";

    fn version() -> Result<Version> {
        trace!("DockerDriver::version()");

        trace!("docker version -f json");
        let output = cmd!("docker", "version", "-f", "json")
            .output()
            .into_diagnostic()?;

        let version_json: DockerVersionJson =
            serde_json::from_slice(&output.stdout).into_diagnostic()?;

        Ok(version_json.client.version)
    }
}

impl BuildDriver for DockerDriver {
    fn build(opts: &BuildOpts) -> Result<()> {
        trace!("DockerDriver::build({opts:#?})");

        trace!(
            "docker build -t {} -f {} .",
            opts.image,
            opts.containerfile.display()
        );
        let status = cmd!(
            "docker",
            "build",
            "-t",
            opts.image.as_ref(),
            "-f",
            opts.containerfile.as_ref(),
            ".",
        )
        .status()
        .into_diagnostic()?;

        if status.success() {
            info!("Successfully built {}", opts.image);
        } else {
            bail!("Failed to build {}", opts.image);
        }
        Ok(())
    }
}

impl RunDriver for DockerDriver {
    fn run(opts: &RunOpts) -> std::io::Result<ExitStatus> {
        trace!("DockerDriver::run({opts:#?})");

        let args = run_args(opts);

        trace!("docker {}", args.join(" "));
        let mut command = cmd!("docker");
        command.args(args);

        command.status()
    }
}

impl ContainerDriver for DockerDriver {
    fn container_exists(name: &str) -> Result<bool> {
        trace!("DockerDriver::container_exists({name})");

        trace!("docker ps --all --filter=name={name} --format={{{{.Names}}}}");
        let output = cmd!(
            "docker",
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
        trace!("DockerDriver::force_remove_container({name})");

        trace!("docker rm -f {name}");
        let status = cmd!("docker", "rm", "-f", name).status().into_diagnostic()?;

        if !status.success() {
            bail!("Failed to remove container {name}");
        }
        Ok(())
    }

    fn container_logs(name: &str) -> Result<String> {
        trace!("DockerDriver::container_logs({name})");

        let output = cmd!("docker", "logs", name).output().into_diagnostic()?;

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
        opts.detach.then(|| string!("-d")),
        opts.interactive.then(|| string_vec!["-i", "-t"]),
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

#[cfg(test)]
mod test {
    use siteforge_utils::string_vec;

    use crate::drivers::opts::{RunOpts, RunOptsPort, RunOptsVolume};

    use super::run_args;

    #[test]
    fn run_args_foreground() {
        let args = string_vec!["--debug", "--verbose"];
        let volumes = [RunOptsVolume::builder()
            .path_or_vol_name("/home/user/site")
            .container_path("/src")
            .build()];
        let opts = RunOpts::builder()
            .image("siteforge-site")
            .remove(true)
            .volumes(&volumes)
            .args(&args)
            .build();

        assert_eq!(
            run_args(&opts),
            string_vec![
                "run",
                "--rm",
                "--volume=/home/user/site:/src",
                "siteforge-site",
                "--debug",
                "--verbose",
            ]
        );
    }

    #[test]
    fn run_args_detached_server() {
        let args = string_vec!["server", "--watch"];
        let ports = [RunOptsPort::builder().host(8080).container(1313).build()];
        let opts = RunOpts::builder()
            .image("siteforge-site")
            .name("siteforge-site")
            .detach(true)
            .ports(&ports)
            .args(&args)
            .build();

        assert_eq!(
            run_args(&opts),
            string_vec![
                "run",
                "--name=siteforge-site",
                "-d",
                "--publish=8080:1313",
                "siteforge-site",
                "server",
                "--watch",
            ]
        );
    }
}
