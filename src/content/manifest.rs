//! Rewriting of the site module manifest to use local content
//! checkouts.

use std::{fs, path::Path};

use log::{debug, trace};
use miette::{bail, Context, IntoDiagnostic, Result};
use siteforge_process_management::{
    drivers::{opts::RunOpts, Driver, RunDriver},
    run_volumes,
};
use siteforge_utils::{
    constants::{CONTAINER_GO_MOD, CONTAINER_SRC_DIR, GO_MOD_FILE, LOCAL_GO_MOD_FILE},
    string, string_vec,
};

use super::{ContentError, ContentMount, MountSpec};
use crate::config::SiteConfig;

/// Copies the module manifest to a working copy and rewrites
/// every locally mounted content repository to reference its
/// in-container path. The rewrite runs the module tool inside
/// the site image so the host needs no toolchain of its own.
/// Returns the mount for the working copy.
///
/// # Errors
/// Will error if the manifest can't be copied or the rewrite
/// invocation fails.
pub fn write_local_manifest(
    config: &SiteConfig,
    pwd: &Path,
    mounts: &[ContentMount],
) -> Result<MountSpec> {
    trace!("write_local_manifest({} mounts)", mounts.len());

    let src = pwd.join(GO_MOD_FILE);
    let dest = pwd.join(LOCAL_GO_MOD_FILE);

    fs::copy(&src, &dest).map_err(|source| ContentError::Manifest {
        src: src.clone(),
        dest: dest.clone(),
        source,
    })?;

    let manifest = MountSpec {
        host: dest.display().to_string(),
        container: CONTAINER_GO_MOD.into(),
    };

    let pwd_str = pwd.display().to_string();
    let mut volumes = run_volumes! { pwd_str.as_str() => CONTAINER_SRC_DIR };
    volumes.push(manifest.volume());

    let mut args = string_vec!["mod", "edit"];
    for mount in mounts {
        args.push(string!("-replace"));
        args.push(format!("{}={}", mount.repo, mount.mount.container));
    }

    debug!("go {}", args.join(" "));
    let opts = RunOpts::builder()
        .image(&config.image)
        .entrypoint("go")
        .remove(true)
        .volumes(&volumes)
        .args(&args)
        .build();

    let status = Driver::run(&opts)
        .into_diagnostic()
        .with_context(|| format!("Could not rewrite {GO_MOD_FILE} to use your local content"))?;

    if !status.success() {
        bail!("Could not rewrite {GO_MOD_FILE} to use your local content");
    }

    Ok(manifest)
}
