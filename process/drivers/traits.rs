use std::process::ExitStatus;

use log::trace;
use miette::Result;
use semver::{Version, VersionReq};

use super::opts::{BuildOpts, RunOpts};

/// Picks the driver to use when none was requested explicitly.
pub trait DetermineDriver<T> {
    fn determine_driver(&mut self) -> T;
}

/// Trait for retrieving version of a driver.
pub trait DriverVersion {
    /// The version req string slice that follows
    /// the semver standard <https://semver.org/>.
    const VERSION_REQ: &'static str;

    /// Returns the version of the driver.
    ///
    /// # Errors
    /// Will error if it can't retrieve the version.
    fn version() -> Result<Version>;

    #[must_use]
    fn is_supported_version() -> bool {
        Self::version().is_ok_and(|version| {
            VersionReq::parse(Self::VERSION_REQ).is_ok_and(|req| req.matches(&version))
        })
    }
}

/// Allows agnostic building of the site image.
pub trait BuildDriver {
    /// Runs the image build logic for the driver.
    ///
    /// # Errors
    /// Will error if the build fails.
    fn build(opts: &BuildOpts) -> Result<()>;
}

/// Allows agnostic running of site containers.
pub trait RunDriver {
    /// Runs a container from the site image.
    ///
    /// # Errors
    /// Will error if there was an issue executing the process.
    fn run(opts: &RunOpts) -> std::io::Result<ExitStatus>;
}

/// Allows agnostic management of named containers.
pub trait ContainerDriver {
    /// Checks if a container with the given name exists.
    ///
    /// # Errors
    /// Will error if the runtime can't list containers.
    fn container_exists(name: &str) -> Result<bool>;

    /// Forcefully removes the named container.
    ///
    /// # Errors
    /// Will error if the removal fails.
    fn force_remove_container(name: &str) -> Result<()>;

    /// Fetches the logs of the named container.
    ///
    /// # Errors
    /// Will error if the logs can't be read.
    fn container_logs(name: &str) -> Result<String>;

    /// Removes the named container if it exists. Removing a
    /// container that doesn't exist is a no-op.
    ///
    /// # Errors
    /// Will error if the removal fails.
    fn remove_container(name: &str) -> Result<()> {
        trace!("ContainerDriver::remove_container({name})");

        if Self::container_exists(name)? {
            Self::force_remove_container(name)?;
        }
        Ok(())
    }
}
