//! This module is responsible for managing the container runtime
//! used to build and run the site image. It hides the runtime
//! details from the command logic and selects an available
//! runtime once at startup.

use std::{
    process::ExitStatus,
    sync::{LazyLock, Mutex, RwLock},
};

use bon::Builder;
use clap::Args;
use log::trace;
use miette::Result;
use siteforge_utils::constants::SITEFORGE_RUN_DRIVER;

use self::{
    docker_driver::DockerDriver,
    opts::{BuildOpts, RunOpts},
    podman_driver::PodmanDriver,
    readiness::{await_container, LogSource, ReadyError, WallClock},
    types::RunDriverType,
};

pub use traits::*;

mod docker_driver;
pub mod opts;
mod podman_driver;
pub mod readiness;
mod traits;
pub mod types;

static INIT: LazyLock<Mutex<bool>> = LazyLock::new(|| Mutex::new(false));
static SELECTED_RUN_DRIVER: LazyLock<RwLock<Option<RunDriverType>>> =
    LazyLock::new(|| RwLock::new(None));

/// Args for selecting the container runtime to use.
///
/// If left uninitialized, the program will determine
/// the best one available.
#[derive(Default, Clone, Copy, Debug, Builder, Args)]
pub struct DriverArgs {
    /// Select which container runtime to use to build
    /// and run the site image.
    #[arg(short = 'R', long, env = SITEFORGE_RUN_DRIVER)]
    run_driver: Option<RunDriverType>,
}

pub struct Driver;

impl Driver {
    /// Initializes the runtime selection with user provided args.
    ///
    /// Runs once; subsequent calls are no-ops.
    pub fn init(mut args: DriverArgs) {
        trace!("Driver::init()");

        let mut initialized = INIT.lock().expect("Must lock INIT");

        if !*initialized {
            let mut driver = SELECTED_RUN_DRIVER.write().expect("Should lock");
            *driver = Some(args.run_driver.determine_driver());
            trace!("Driver set {driver:?}");
            drop(driver);

            *initialized = true;
        }
    }

    fn get_run_driver() -> RunDriverType {
        let lock = SELECTED_RUN_DRIVER.read().expect("Should read");
        lock.expect("Driver should have been initialized")
    }

    /// Waits for the named container to log the readiness marker.
    ///
    /// # Errors
    /// Will error if the logs can't be read or the marker doesn't
    /// appear within the timeout.
    pub fn await_ready(name: &str, marker: &str) -> Result<(), ReadyError> {
        await_container(&WallClock, &Driver, name, marker)
    }
}

impl BuildDriver for Driver {
    fn build(opts: &BuildOpts) -> Result<()> {
        match Self::get_run_driver() {
            RunDriverType::Docker => DockerDriver::build(opts),
            RunDriverType::Podman => PodmanDriver::build(opts),
        }
    }
}

impl RunDriver for Driver {
    fn run(opts: &RunOpts) -> std::io::Result<ExitStatus> {
        match Self::get_run_driver() {
            RunDriverType::Docker => DockerDriver::run(opts),
            RunDriverType::Podman => PodmanDriver::run(opts),
        }
    }
}

impl ContainerDriver for Driver {
    fn container_exists(name: &str) -> Result<bool> {
        match Self::get_run_driver() {
            RunDriverType::Docker => DockerDriver::container_exists(name),
            RunDriverType::Podman => PodmanDriver::container_exists(name),
        }
    }

    fn force_remove_container(name: &str) -> Result<()> {
        match Self::get_run_driver() {
            RunDriverType::Docker => DockerDriver::force_remove_container(name),
            RunDriverType::Podman => PodmanDriver::force_remove_container(name),
        }
    }

    fn container_logs(name: &str) -> Result<String> {
        match Self::get_run_driver() {
            RunDriverType::Docker => DockerDriver::container_logs(name),
            RunDriverType::Podman => PodmanDriver::container_logs(name),
        }
    }
}

impl LogSource for Driver {
    fn logs(&self, name: &str) -> Result<String> {
        Self::container_logs(name)
    }
}
