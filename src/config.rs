use std::path::PathBuf;

use indexmap::IndexMap;
use log::warn;
use miette::Result;
use siteforge_utils::constants::{
    CONTAINER_FILE, CONTENT_REPOS, SITEFORGE_CONTENT, SITE_CONTAINER_NAME, SITE_IMAGE,
};

#[cfg(not(test))]
use siteforge_utils::get_env_var;
#[cfg(test)]
use siteforge_utils::test_utils::get_env_var;

use crate::content::parse_overrides;

/// Settings for a single invocation, populated once at startup.
///
/// The content override variable is parsed here so malformed
/// overrides fail before any external command runs.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub container_name: String,
    pub image: String,
    pub containerfile: PathBuf,
    pub content_repos: Vec<String>,
    pub overrides: IndexMap<String, PathBuf>,
}

impl SiteConfig {
    /// Builds the configuration from the defaults and the
    /// environment.
    ///
    /// # Errors
    /// Will error if the content override variable is malformed.
    pub fn from_env() -> Result<Self> {
        let overrides = parse_overrides(&get_env_var(SITEFORGE_CONTENT).unwrap_or_default())?;

        let content_repos: Vec<String> = CONTENT_REPOS.iter().map(ToString::to_string).collect();

        for repo in overrides.keys() {
            if !content_repos.iter().any(|declared| declared == repo) {
                warn!("Content override for {repo} doesn't match any declared content repository");
            }
        }

        Ok(Self {
            container_name: SITE_CONTAINER_NAME.into(),
            image: SITE_IMAGE.into(),
            containerfile: CONTAINER_FILE.into(),
            content_repos,
            overrides,
        })
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use siteforge_utils::{
        constants::{CONTENT_REPOS, SITEFORGE_CONTENT},
        test_utils::set_env_var,
    };

    use super::SiteConfig;

    #[test]
    fn defaults_without_overrides() {
        set_env_var(SITEFORGE_CONTENT, "");

        let config = SiteConfig::from_env().unwrap();

        assert!(config.overrides.is_empty());
        assert_eq!(config.content_repos.len(), CONTENT_REPOS.len());
    }

    #[test]
    fn parses_override_variable() {
        set_env_var(
            SITEFORGE_CONTENT,
            "github.com/siteforge-dev/site-content=../content",
        );

        let config = SiteConfig::from_env().unwrap();

        assert_eq!(
            config.overrides.get("github.com/siteforge-dev/site-content"),
            Some(&PathBuf::from("../content"))
        );
    }

    #[test]
    fn keeps_unknown_override_keys() {
        set_env_var(SITEFORGE_CONTENT, "github.com/acme/unknown=../elsewhere");

        let config = SiteConfig::from_env().unwrap();

        assert!(config.overrides.contains_key("github.com/acme/unknown"));
    }

    #[test]
    fn rejects_malformed_override_variable() {
        set_env_var(SITEFORGE_CONTENT, "a=b=c");

        assert!(SiteConfig::from_env().is_err());
    }
}
