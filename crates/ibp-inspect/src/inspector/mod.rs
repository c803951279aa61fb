//! Source inspection strategies.
//!
//! An [`Inspector`] recovers plugin metadata from the metadata source and
//! mutator-backed properties from the filter source. Two strategies exist:
//! [`StructuralInspector`] walks a Tree-sitter syntax tree and
//! [`PatternInspector`] matches regular expressions over raw text.
//! [`FallbackInspector`] composes them, consulting the secondary strategy only
//! when the primary one fails or finds nothing.

mod pattern;
mod structural;

use tracing::{debug, warn};

use crate::error::InspectError;
use crate::model::{PluginMetadata, RawProperties};

pub use self::pattern::PatternInspector;
pub(crate) use self::pattern::compile_pattern;
pub use self::structural::StructuralInspector;

/// Tracing target for inspection strategy selection.
const INSPECT_TARGET: &str = "ibp_inspect::inspector";

/// Strategy for recovering metadata and properties from plugin source text.
pub trait Inspector {
    /// Recovers `name` and `description` from `insert` calls in `source`.
    ///
    /// # Errors
    ///
    /// Returns an error when the strategy cannot process the source.
    fn metadata(&self, source: &str) -> Result<PluginMetadata, InspectError>;

    /// Recovers one-parameter `set*` mutators from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error when the strategy cannot process the source.
    fn mutators(&self, source: &str) -> Result<RawProperties, InspectError>;
}

/// Composes two inspectors, using the secondary one only when the primary
/// one fails or returns an empty result.
///
/// # Example
///
/// ```rust,ignore
/// use ibp_inspect::{FallbackInspector, Inspector};
///
/// let inspector = FallbackInspector::standard()?;
/// let metadata = inspector.metadata(r#"info.insert("name", QObject::tr("Blur"));"#)?;
/// assert_eq!(metadata.name.as_deref(), Some("Blur"));
/// ```
#[derive(Debug, Clone)]
pub struct FallbackInspector<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackInspector<P, S> {
    /// Creates a fallback combinator.
    pub const fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl FallbackInspector<StructuralInspector, PatternInspector> {
    /// Creates the structural-then-pattern inspector used by the scanner.
    ///
    /// # Errors
    ///
    /// Returns an error if the scanning patterns fail to compile.
    pub fn standard() -> Result<Self, InspectError> {
        Ok(Self::new(StructuralInspector::new(), PatternInspector::new()?))
    }
}

impl<P: Inspector, S: Inspector> Inspector for FallbackInspector<P, S> {
    fn metadata(&self, source: &str) -> Result<PluginMetadata, InspectError> {
        match self.primary.metadata(source) {
            Ok(found) if !found.is_empty() => Ok(found),
            Ok(_) => {
                debug!(target: INSPECT_TARGET, "no metadata found structurally, using patterns");
                self.secondary.metadata(source)
            }
            Err(error) => {
                warn!(
                    target: INSPECT_TARGET,
                    error = %error,
                    "structural metadata inspection failed, using patterns"
                );
                self.secondary.metadata(source)
            }
        }
    }

    fn mutators(&self, source: &str) -> Result<RawProperties, InspectError> {
        match self.primary.mutators(source) {
            Ok(found) if !found.is_empty() => Ok(found),
            Ok(_) => {
                debug!(target: INSPECT_TARGET, "no mutators found structurally, using patterns");
                self.secondary.mutators(source)
            }
            Err(error) => {
                warn!(
                    target: INSPECT_TARGET,
                    error = %error,
                    "structural mutator inspection failed, using patterns"
                );
                self.secondary.mutators(source)
            }
        }
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests;
