//! imageguard - registry allow-list checks for Dockerfiles
//!
//! Resolves the image references a Dockerfile pulls from and reports the ones
//! that do not come from an allowed container registry.
//!
//! # Core Concepts
//!
//! - **Build arguments**: global `ARG`s (those before the first `FROM`) merged with
//!   `--build-arg` overrides, expanded left to right
//! - **Image references**: `FROM` images (placeholders expanded) and `COPY --from`
//!   values (taken literally)
//! - **Allow-list**: registry host suffixes; `docker.io` admits references with no
//!   registry host, and stage names are always admitted
//!
//! # Example Usage
//!
//! ```
//! use imageguard::{AllowedRegistrySet, DockerDetector};
//!
//! let detector = DockerDetector::new(AllowedRegistrySet::new([".azurecr.io"]));
//! let analysis = detector
//!     .analyze_text(
//!         "ARG REGISTRY\nFROM $REGISTRY/ubuntu\n",
//!         "--build-arg REGISTRY=test.azurecr2.io",
//!     )
//!     .unwrap();
//!
//! let unallowed = analysis.unallowed();
//! assert_eq!(unallowed[0].resolved_image, "test.azurecr2.io/ubuntu");
//! assert_eq!(unallowed[0].line, 2);
//! ```

pub mod build_args;
pub mod cli;
pub mod compliance;
pub mod config;
pub mod detector;
pub mod dockerfile;
pub mod error;
pub mod util;

pub use compliance::{AllowedRegistrySet, ImageReference, ReferenceOrigin};
pub use config::{ConfigError, ImageGuardConfig};
pub use detector::{Analysis, DockerDetector, SkipReason};
pub use dockerfile::{Comment, Dockerfile, Instruction};
pub use error::DetectorError;
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_imageguard() {
        assert_eq!(NAME, "imageguard");
    }
}
