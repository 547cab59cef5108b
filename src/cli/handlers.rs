use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::commands::{CheckArgs, ConfigArgs};
use super::output::{CheckReport, FileReport, OutputFormatter};
use crate::compliance::AllowedRegistrySet;
use crate::config::ImageGuardConfig;
use crate::detector::DockerDetector;

/// `log_level` is the level given on the command line, if any.
pub fn handle_check(args: &CheckArgs, log_level: Option<&str>) -> i32 {
    match run_check(args, log_level) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            2
        }
    }
}

pub fn handle_config(args: &ConfigArgs, log_level: Option<&str>) -> i32 {
    let mut config = ImageGuardConfig::default();
    if let Some(level) = log_level {
        config.log_level = level.to_lowercase();
    }
    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_config(&config) {
        Ok(output) => {
            print!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_check(args: &CheckArgs, log_level: Option<&str>) -> Result<i32> {
    let config = resolve_config(args, log_level);
    config.validate()?;
    debug!(config = %config, "Effective configuration");

    let detector = config.detector();
    let files = args
        .dockerfiles
        .iter()
        .map(|path| check_file(&detector, path, &config.build_args))
        .collect();
    let report = CheckReport::new(files);

    let formatter = OutputFormatter::new(args.format.into());
    let output = formatter.format_report(&report)?;
    write_output(&output, args.output.as_ref())?;

    Ok(report.exit_code())
}

fn resolve_config(args: &CheckArgs, log_level: Option<&str>) -> ImageGuardConfig {
    let mut config = ImageGuardConfig::default();
    if let Some(level) = log_level {
        config.log_level = level.to_lowercase();
    }
    if !args.allow.is_empty() {
        config.allowed_registries = AllowedRegistrySet::parse(&args.allow.join(","));
    }
    if let Some(build_args) = &args.build_args {
        config.build_args = build_args.clone();
    }
    config
}

fn check_file(detector: &DockerDetector, path: &Path, build_args: &str) -> FileReport {
    info!(path = %path.display(), "Checking Dockerfile");

    let text = match fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))
    {
        Ok(text) => text,
        Err(e) => {
            error!("{:#}", e);
            return FileReport::failed(path, format!("{:#}", e));
        }
    };

    match detector.analyze_text(&text, build_args) {
        Ok(analysis) => FileReport::from_analysis(path, analysis),
        Err(e) => {
            error!(path = %path.display(), error = %e, "Analysis failed");
            FileReport::from_error(path, &e)
        }
    }
}

fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    match path {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            print!("{}", output);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormatArg;
    use crate::config::{ENV_ALLOWED_REGISTRIES, ENV_BUILD_ARGS, ENV_LOG_LEVEL};
    use serial_test::serial;
    use std::env;

    fn check_args(allow: &[&str], build_args: Option<&str>) -> CheckArgs {
        CheckArgs {
            dockerfiles: vec![PathBuf::from("Dockerfile")],
            allow: allow.iter().map(|a| a.to_string()).collect(),
            build_args: build_args.map(str::to_string),
            format: OutputFormatArg::Human,
            output: None,
        }
    }

    #[test]
    #[serial]
    fn test_cli_log_level_overrides_env() {
        env::set_var(ENV_LOG_LEVEL, "verbose");
        let config = resolve_config(&check_args(&[".azurecr.io"], None), Some("DEBUG"));
        env::remove_var(ENV_LOG_LEVEL);

        assert_eq!(config.log_level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_cli_values_override_env() {
        env::set_var(ENV_ALLOWED_REGISTRIES, "ghcr.io");
        env::set_var(ENV_BUILD_ARGS, "--build-arg A=1");
        let config = resolve_config(
            &check_args(&[".azurecr.io", "docker.io"], Some("--build-arg A=2")),
            None,
        );
        env::remove_var(ENV_ALLOWED_REGISTRIES);
        env::remove_var(ENV_BUILD_ARGS);

        assert_eq!(config.allowed_registries.entries(), [".azurecr.io", "docker.io"]);
        assert_eq!(config.build_args, "--build-arg A=2");
    }
}
