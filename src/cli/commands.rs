use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build-argument resolution and registry allow-list checks for Dockerfiles
#[derive(Parser, Debug)]
#[command(
    name = "imageguard",
    about = "Checks that Dockerfile base images come from allowed registries",
    version,
    long_about = "imageguard resolves ARG defaults and --build-arg overrides in FROM and \
                  COPY --from references, then reports every image that is not pulled \
                  from an allowed container registry."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// Log level requested on the command line; `--log-level` beats `-v` and `-q`.
    pub fn effective_log_level(&self) -> Option<&str> {
        match &self.log_level {
            Some(level) => Some(level.as_str()),
            None if self.verbose => Some("debug"),
            None if self.quiet => Some("error"),
            None => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Check Dockerfiles against the allowed registries",
        long_about = "Resolves build arguments and checks every FROM and COPY --from image \
                      reference against the allowed registries.\n\n\
                      Exit codes: 0 compliant or skipped, 1 unallowed images found, \
                      2 analysis failed.\n\n\
                      Examples:\n  \
                      imageguard check Dockerfile --allow .azurecr.io\n  \
                      imageguard check Dockerfile --allow .azurecr.io --allow docker.io \\\n    \
                      --build-args \"--build-arg REGISTRY=contoso.azurecr.io\"\n  \
                      imageguard check a/Dockerfile b/Dockerfile --format json"
    )]
    Check(CheckArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    #[arg(value_name = "DOCKERFILE", required = true, help = "Dockerfiles to check")]
    pub dockerfiles: Vec<PathBuf>,

    #[arg(
        short = 'a',
        long = "allow",
        value_name = "REGISTRY",
        help = "Allowed registry suffix, repeatable (overrides IMAGEGUARD_ALLOWED_REGISTRIES)"
    )]
    pub allow: Vec<String>,

    #[arg(
        long,
        value_name = "ARGS",
        allow_hyphen_values = true,
        help = "docker build arguments containing --build-arg flags (overrides IMAGEGUARD_BUILD_ARGS)"
    )]
    pub build_args: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
