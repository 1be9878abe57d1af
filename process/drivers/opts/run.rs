use bon::Builder;

/// Options for running a container from the site image.
#[derive(Debug, Clone, Copy, Builder)]
pub struct RunOpts<'scope> {
    pub image: &'scope str,

    #[builder(default)]
    pub args: &'scope [String],

    #[builder(default)]
    pub volumes: &'scope [RunOptsVolume<'scope>],

    #[builder(default)]
    pub ports: &'scope [RunOptsPort],

    pub name: Option<&'scope str>,
    pub entrypoint: Option<&'scope str>,

    #[builder(default)]
    pub detach: bool,

    #[builder(default)]
    pub interactive: bool,

    #[builder(default)]
    pub remove: bool,
}

#[derive(Debug, Clone, Copy, Builder)]
pub struct RunOptsVolume<'scope> {
    pub path_or_vol_name: &'scope str,
    pub container_path: &'scope str,
}

#[macro_export]
macro_rules! run_volumes {
    ($($host:expr => $container:expr),+ $(,)?) => {
        vec![
            $($crate::drivers::opts::RunOptsVolume::builder()
                .path_or_vol_name($host)
                .container_path($container)
                .build(),)+
        ]
    };
}

/// A host-port-to-container-port binding.
#[derive(Debug, Clone, Copy, Builder)]
pub struct RunOptsPort {
    pub host: u16,
    pub container: u16,
}
