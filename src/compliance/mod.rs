//! Registry compliance
//!
//! Extracts image references from `FROM` and `COPY --from` instructions and
//! checks them against an allow-list of registry suffixes.

pub mod classifier;
pub mod extractor;
pub mod registry;

pub use classifier::classify;
pub use extractor::{extract, Extraction, ImageReference, ReferenceOrigin};
pub use registry::{AllowedRegistrySet, IMPLICIT_REGISTRY};
