// Paths
pub const CONTAINER_FILE: &str = "dev.Dockerfile";
pub const GO_MOD_FILE: &str = "go.mod";
pub const LOCAL_GO_MOD_FILE: &str = "go.local.mod";
pub const PUBLIC_PATH: &str = "website/public";
pub const THEME_PATH: &str = "themes/docsy";
pub const CONTAINER_SRC_DIR: &str = "/src";
pub const CONTAINER_GO_MOD: &str = "/src/go.mod";

// SiteForge vars
pub const PORT: &str = "PORT";
pub const SITEFORGE_CONTENT: &str = "SITEFORGE_CONTENT";
pub const SITEFORGE_RUN_DRIVER: &str = "SITEFORGE_RUN_DRIVER";

// Content repositories pulled in as site modules. A local
// checkout in a sibling directory (or a path from the content
// override variable) is mounted over the remote source.
pub const CONTENT_REPOS: &[&str] = &[
    "github.com/siteforge-dev/site-content",
    "github.com/siteforge-dev/site-examples",
];

// Misc
pub const SITE_CONTAINER_NAME: &str = "siteforge-site";
pub const SITE_IMAGE: &str = "siteforge-site";
pub const GENERATOR_PORT: u16 = 1313;
pub const READY_MARKER: &str = "Web Server is available";
