use super::{AllowedRegistrySet, ImageReference};
use tracing::{debug, warn};

/// Returns the references that are not allowed, in extraction order.
///
/// A reference without `/` is allowed when it names a stage defined at or
/// before its position (case-insensitively) or when the implicit registry is
/// allowed. Otherwise the text before the first `/` is the
/// registry host and must end with one of the allowed suffixes.
pub fn classify(
    references: &[ImageReference],
    stages: &[String],
    allowed: &AllowedRegistrySet,
) -> Vec<ImageReference> {
    references
        .iter()
        .filter(|reference| {
            let visible = &stages[..reference.visible_stages.min(stages.len())];
            !is_allowed(&reference.resolved_image, visible, allowed)
        })
        .inspect(|reference| {
            warn!(
                line = reference.line,
                image = %reference.resolved_image,
                "Image reference is not from an allowed registry"
            );
        })
        .cloned()
        .collect()
}

fn is_allowed(image: &str, stages: &[String], allowed: &AllowedRegistrySet) -> bool {
    match image.split_once('/') {
        None => {
            let is_stage = stages.iter().any(|stage| stage.eq_ignore_ascii_case(image));
            debug!(image, is_stage, "Reference without registry host");
            is_stage || allowed.allows_implicit_registry()
        }
        Some((host, _)) => allowed.host_is_allowed(host),
    }
}
