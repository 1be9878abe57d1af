use std::{borrow::Cow, path::Path};

use bon::Builder;

/// Options for building the site image.
#[derive(Debug, Clone, Builder)]
pub struct BuildOpts<'scope> {
    #[builder(into)]
    pub image: Cow<'scope, str>,

    /// The path to the Containerfile to build.
    #[builder(into)]
    pub containerfile: Cow<'scope, Path>,
}
