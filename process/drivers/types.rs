use clap::ValueEnum;
use log::trace;

use crate::drivers::{
    docker_driver::DockerDriver, podman_driver::PodmanDriver, DetermineDriver, DriverVersion,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RunDriverType {
    Podman,
    Docker,
}

impl DetermineDriver<RunDriverType> for Option<RunDriverType> {
    fn determine_driver(&mut self) -> RunDriverType {
        trace!("RunDriverType::determine_driver()");

        *self.get_or_insert(
            match (
                siteforge_utils::check_command_exists("docker"),
                siteforge_utils::check_command_exists("podman"),
            ) {
                (Ok(()), _) if DockerDriver::is_supported_version() => RunDriverType::Docker,
                (_, Ok(())) if PodmanDriver::is_supported_version() => RunDriverType::Podman,
                _ => panic!(
                    "{}{}{}",
                    "Could not determine container runtime, ",
                    format_args!("need either docker version {} ", DockerDriver::VERSION_REQ),
                    format_args!("or podman version {} to continue", PodmanDriver::VERSION_REQ),
                ),
            },
        )
    }
}
