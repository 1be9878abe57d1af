//! Resolution of local content repository checkouts into
//! container mount bindings.
//!
//! Each declared content repository may have a local checkout,
//! either at the path named by the content override variable or
//! in a sibling directory next to the site checkout. Local
//! checkouts are mounted over their remote module sources.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info, trace};
use miette::{Context, Diagnostic, IntoDiagnostic, Result};
use siteforge_process_management::{drivers::opts::RunOptsVolume, run_volumes};
use siteforge_utils::constants::CONTAINER_SRC_DIR;
use thiserror::Error;

use crate::config::SiteConfig;

pub mod manifest;

#[derive(Debug, Error, Diagnostic)]
pub enum ContentError {
    #[error("Invalid content override '{0}', expected 'repo=path'")]
    MalformedOverride(String),

    #[error("Could not copy {} to {}", .src.display(), .dest.display())]
    Manifest {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A host-path-to-container-path binding for the container
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    pub host: String,
    pub container: String,
}

impl MountSpec {
    #[must_use]
    pub fn volume(&self) -> RunOptsVolume<'_> {
        RunOptsVolume::builder()
            .path_or_vol_name(&self.host)
            .container_path(&self.container)
            .build()
    }
}

/// A declared content repository that resolved to a local
/// checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentMount {
    pub repo: String,
    pub dir_name: String,
    pub mount: MountSpec,
}

/// The resolved local content for an invocation: mounts for the
/// local checkouts plus the rewritten module manifest mount when
/// any checkout was found.
#[derive(Debug, Clone, Default)]
pub struct LocalContent {
    pub mounts: Vec<ContentMount>,
    pub manifest: Option<MountSpec>,
}

impl LocalContent {
    /// Volume bindings for a generator run: the project root
    /// first, then the local checkouts, then the rewritten
    /// manifest.
    #[must_use]
    pub fn volumes<'scope>(&'scope self, pwd: &'scope str) -> Vec<RunOptsVolume<'scope>> {
        let mut volumes = run_volumes! { pwd => CONTAINER_SRC_DIR };
        volumes.extend(self.mounts.iter().map(|mount| mount.mount.volume()));
        volumes.extend(self.manifest.iter().map(MountSpec::volume));
        volumes
    }
}

/// Parses the content override variable, a comma-separated list
/// of `repo=path` pairs.
///
/// # Errors
/// Will error if any entry doesn't split into exactly two
/// non-empty parts on `=`.
pub fn parse_overrides(value: &str) -> Result<IndexMap<String, PathBuf>, ContentError> {
    trace!("parse_overrides({value})");

    if value.is_empty() {
        return Ok(IndexMap::new());
    }

    value
        .split(',')
        .map(|entry| {
            let mut parts = entry.split('=');

            match (parts.next(), parts.next(), parts.next()) {
                (Some(repo), Some(path), None) if !repo.is_empty() && !path.is_empty() => {
                    Ok((repo.to_string(), PathBuf::from(path)))
                }
                _ => Err(ContentError::MalformedOverride(entry.to_string())),
            }
        })
        .collect()
}

/// For each declared content repository, checks for a local
/// checkout and returns a mount binding for every one found on
/// disk. Repositories without a local checkout keep their remote
/// source.
///
/// # Errors
/// Will error if a local checkout path can't be resolved.
pub fn resolve_mounts(config: &SiteConfig, pwd: &Path) -> Result<Vec<ContentMount>> {
    trace!("resolve_mounts({})", pwd.display());

    let mut mounts = Vec::new();

    for repo in &config.content_repos {
        let dir_name = repo_dir_name(repo);
        let local = config
            .overrides
            .get(repo)
            .map_or_else(|| pwd.join("..").join(dir_name), Clone::clone);

        debug!("Checking for a local copy of {repo} at {}", local.display());

        if !local.exists() {
            continue;
        }

        let host = local
            .canonicalize()
            .into_diagnostic()
            .with_context(|| format!("Could not resolve local path {}", local.display()))?;

        info!("Using your local copy of {repo} -> {}", host.display());

        mounts.push(ContentMount {
            repo: repo.clone(),
            dir_name: dir_name.to_string(),
            mount: MountSpec {
                host: host.display().to_string(),
                container: format!("{CONTAINER_SRC_DIR}/{dir_name}"),
            },
        });
    }

    Ok(mounts)
}

/// Resolves local checkouts of the declared content repositories
/// and, when any exist, rewrites the module manifest to point at
/// their in-container paths.
///
/// # Errors
/// Will error if resolution or the manifest rewrite fails.
pub fn local_content(config: &SiteConfig, pwd: &Path) -> Result<LocalContent> {
    let mounts = resolve_mounts(config, pwd)?;

    let manifest = if mounts.is_empty() {
        None
    } else {
        Some(manifest::write_local_manifest(config, pwd, &mounts)?)
    };

    Ok(LocalContent { mounts, manifest })
}

fn repo_dir_name(repo: &str) -> &str {
    repo.rsplit('/').next().unwrap_or(repo)
}

#[cfg(test)]
mod test {
    use std::{fs, path::PathBuf};

    use indexmap::IndexMap;
    use rstest::rstest;
    use tempfile::TempDir;

    use crate::config::SiteConfig;

    use super::{parse_overrides, resolve_mounts, ContentError, LocalContent, MountSpec};

    fn test_config(content_repos: &[&str], overrides: IndexMap<String, PathBuf>) -> SiteConfig {
        SiteConfig {
            container_name: "siteforge-site".into(),
            image: "siteforge-site".into(),
            containerfile: "dev.Dockerfile".into(),
            content_repos: content_repos.iter().map(ToString::to_string).collect(),
            overrides,
        }
    }

    #[test]
    fn parses_override_pairs_in_order() {
        let overrides = parse_overrides("github.com/acme/a=./x,github.com/acme/b=./y").unwrap();

        assert_eq!(
            overrides.into_iter().collect::<Vec<_>>(),
            vec![
                ("github.com/acme/a".into(), PathBuf::from("./x")),
                ("github.com/acme/b".into(), PathBuf::from("./y")),
            ]
        );
    }

    #[test]
    fn parses_empty_value_to_no_overrides() {
        assert!(parse_overrides("").unwrap().is_empty());
    }

    #[rstest]
    #[case("a=b=c")]
    #[case("a")]
    #[case("a=")]
    #[case("=b")]
    #[case("a=./x,b")]
    fn rejects_malformed_overrides(#[case] value: &str) {
        let err = parse_overrides(value).unwrap_err();

        assert!(matches!(err, ContentError::MalformedOverride(_)));
    }

    #[test]
    fn resolves_override_and_sibling_checkouts() {
        let tmp = TempDir::new().unwrap();
        let pwd = tmp.path().join("site");
        fs::create_dir(&pwd).unwrap();

        // `a` has an override checkout, `b`'s override path is
        // missing, `c` has no override and no sibling checkout.
        let checkout_a = tmp.path().join("checkout-a");
        fs::create_dir(&checkout_a).unwrap();

        let overrides = IndexMap::from([
            ("github.com/acme/a".to_string(), checkout_a.clone()),
            ("github.com/acme/b".to_string(), tmp.path().join("missing")),
        ]);
        let config = test_config(
            &["github.com/acme/a", "github.com/acme/b", "github.com/acme/c"],
            overrides,
        );

        let mounts = resolve_mounts(&config, &pwd).unwrap();

        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts[0].repo, "github.com/acme/a");
        assert_eq!(mounts[0].mount.container, "/src/a");
        assert_eq!(
            mounts[0].mount.host,
            checkout_a.canonicalize().unwrap().display().to_string()
        );
    }

    #[test]
    fn falls_back_to_sibling_directory() {
        let tmp = TempDir::new().unwrap();
        let pwd = tmp.path().join("site");
        fs::create_dir(&pwd).unwrap();

        let sibling = tmp.path().join("site-content");
        fs::create_dir(&sibling).unwrap();

        let config = test_config(&["github.com/acme/site-content"], IndexMap::new());

        let mounts = resolve_mounts(&config, &pwd).unwrap();

        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts[0].dir_name, "site-content");
        assert_eq!(mounts[0].mount.container, "/src/site-content");
    }

    #[test]
    fn resolves_nothing_without_local_checkouts() {
        let tmp = TempDir::new().unwrap();
        let pwd = tmp.path().join("site");
        fs::create_dir(&pwd).unwrap();

        let config = test_config(&["github.com/acme/a", "github.com/acme/b"], IndexMap::new());

        let mounts = resolve_mounts(&config, &pwd).unwrap();

        assert!(mounts.is_empty());
    }

    #[test]
    fn volumes_start_with_the_project_root() {
        let content = LocalContent {
            mounts: vec![],
            manifest: Some(MountSpec {
                host: "/home/user/site/go.local.mod".into(),
                container: "/src/go.mod".into(),
            }),
        };

        let volumes = content.volumes("/home/user/site");

        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[0].path_or_vol_name, "/home/user/site");
        assert_eq!(volumes[0].container_path, "/src");
        assert_eq!(volumes[1].container_path, "/src/go.mod");
    }
}
