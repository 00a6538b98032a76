//! Configuration for dominator tree construction.

/// Knobs for a [`DomTreeBuilder`](crate::DomTreeBuilder) run.
///
/// The builder always checks the postorder numbering it is handed; these options control
/// the extra work done around the fixpoint itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuilderConfig {
    /// Re-check the finished tree before returning it (every non-entry node has a
    /// dominator with a strictly higher postorder index, and the entry sits on top).
    /// Cheap, linear in the node count; mostly useful when the numbering comes from a host.
    pub verify_result: bool,

    /// Abort with [`Error::PassLimit`](crate::Error::PassLimit) when the fixpoint has not
    /// settled after this many passes. The count includes the final pass that confirms
    /// nothing changed, so an acyclic graph with more than one node needs two. `None` means unbounded.
    pub max_passes: Option<usize>,
}

impl BuilderConfig {
    /// Creates a configuration with every optional check disabled. Same as the default.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            verify_result: false,
            max_passes: None,
        }
    }

    /// Creates a configuration that verifies every produced tree.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            verify_result: true,
            max_passes: None,
        }
    }

    /// Returns a copy of this configuration with the given pass limit.
    #[must_use]
    pub fn with_max_passes(mut self, limit: usize) -> Self {
        self.max_passes = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let default = BuilderConfig::default();
        assert!(!default.verify_result);
        assert_eq!(default.max_passes, None);
        assert_eq!(BuilderConfig::fast(), default);

        let strict = BuilderConfig::strict();
        assert!(strict.verify_result);
        assert_eq!(strict.max_passes, None);
    }

    #[test]
    fn test_with_max_passes() {
        let config = BuilderConfig::strict().with_max_passes(8);
        assert!(config.verify_result);
        assert_eq!(config.max_passes, Some(8));
    }
}
