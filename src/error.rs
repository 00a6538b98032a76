use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Each variant provides specific context about the failure mode so callers can tell a graph
/// that violates the builder's preconditions apart from one that was assembled incorrectly.
///
/// # Error Categories
///
/// ## Dominator Computation
/// - [`Error::UnresolvableDominator`] - A node has no predecessor with a known dominator
/// - [`Error::PassLimit`] - The fixpoint did not settle within the configured pass budget
///
/// ## Input Validation
/// - [`Error::Malformed`] - Broken postorder numbering or an inconsistent graph
/// - [`Error::Empty`] - The graph contains no nodes
///
/// ## Graph Construction
/// - [`Error::GraphError`] - Invalid block or edge insertion
///
/// # Examples
///
/// ```rust
/// use cfgdom::{Address, ControlFlowGraph, DomTreeBuilder, Error};
///
/// let mut cfg = ControlFlowGraph::new(Address::new(0x1000));
/// cfg.add_block(Address::new(0x2000));
/// cfg.number_postorder();
///
/// match DomTreeBuilder::new().build(&cfg) {
///     Ok(tree) => println!("{} nodes", tree.len()),
///     Err(Error::UnresolvableDominator { postorder }) => {
///         eprintln!("node #{postorder} is not reachable from the entry");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// No predecessor of a node had an established dominator during a pass.
    ///
    /// This is fatal to the build call. It means the node is not reachable from the entry,
    /// is a second entry-like node without predecessors, or the postorder numbering is
    /// corrupt. No partial tree is produced.
    ///
    /// The associated value is the postorder index of the offending node.
    #[error("No predecessor with a known dominator for node #{postorder}")]
    UnresolvableDominator {
        /// Postorder index of the node that could not be resolved
        postorder: usize,
    },

    /// The input violates a structural precondition.
    ///
    /// Raised for missing, duplicate, or out-of-range postorder indices, an entry that does
    /// not occupy the highest index, predecessor addresses unknown to the graph, or a
    /// finished tree that fails verification. The error includes the source location where
    /// the violation was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The fixpoint exceeded the configured number of passes.
    ///
    /// Only raised when [`crate::BuilderConfig::max_passes`] is set. The associated value is
    /// the limit that was reached.
    #[error("Dominator computation did not converge within {0} passes")]
    PassLimit(usize),

    /// Provided graph was empty.
    #[error("Provided graph was empty")]
    Empty,

    /// Control flow graph construction error.
    ///
    /// Covers edges and postorder assignments that reference unknown blocks.
    #[error("{0}")]
    GraphError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_macro_captures_location() {
        let err = malformed_error!("bad index {}", 7);
        match err {
            Error::Malformed {
                message,
                file,
                line,
            } => {
                assert_eq!(message, "bad index 7");
                assert!(file.ends_with("error.rs"));
                assert!(line > 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unresolvable_display() {
        let err = Error::UnresolvableDominator { postorder: 3 };
        assert_eq!(
            err.to_string(),
            "No predecessor with a known dominator for node #3"
        );
    }
}
