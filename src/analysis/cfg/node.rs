//! Block identity and per-block numbering.

use std::{fmt, str::FromStr};

use crate::{analysis::cfg::FlowNode, Error};

/// Start address of a basic block in the analyzed image.
///
/// Addresses are the stable identity of CFG nodes: they are unique within a graph and never
/// change while the graph lives, unlike arena positions or postorder numbers.
///
/// # Examples
///
/// ```rust
/// use cfgdom::Address;
///
/// let addr: Address = "0x401000".parse()?;
/// assert_eq!(addr.value(), 0x40_1000);
/// assert_eq!(addr.to_string(), "0x401000");
///
/// let decimal: Address = "4096".parse()?;
/// assert_eq!(decimal, Address::new(0x1000));
/// # Ok::<(), cfgdom::Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(u64);

impl Address {
    /// Creates a new `Address` from a raw value.
    #[must_use]
    #[inline]
    pub const fn new(value: u64) -> Self {
        Address(value)
    }

    /// Returns the raw address value.
    #[must_use]
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{:x})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl From<u64> for Address {
    #[inline]
    fn from(value: u64) -> Self {
        Address(value)
    }
}

impl From<Address> for u64 {
    #[inline]
    fn from(address: Address) -> Self {
        address.0
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parses a hexadecimal (`0x` / `0X` prefixed) or decimal address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            u64::from_str_radix(hex, 16)
        } else {
            s.parse::<u64>()
        };

        parsed
            .map(Address)
            .map_err(|e| malformed_error!("Invalid address '{}': {}", s, e))
    }
}

/// A vertex of a [`ControlFlowGraph`](crate::ControlFlowGraph).
///
/// Carries the block's address and the postorder index assigned by
/// [`ControlFlowGraph::number_postorder`](crate::ControlFlowGraph::number_postorder) or
/// supplied by the host through
/// [`ControlFlowGraph::set_postorder`](crate::ControlFlowGraph::set_postorder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfgNode {
    pub(crate) address: Address,
    pub(crate) postorder: Option<usize>,
}

impl CfgNode {
    /// Creates an unnumbered node for the given address.
    #[must_use]
    pub fn new(address: Address) -> Self {
        CfgNode {
            address,
            postorder: None,
        }
    }

    /// Returns the block address.
    #[must_use]
    #[inline]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns the postorder index, or `None` if the node has not been numbered.
    #[must_use]
    #[inline]
    pub fn postorder(&self) -> Option<usize> {
        self.postorder
    }
}

impl FlowNode for CfgNode {
    fn address(&self) -> Address {
        self.address
    }

    fn postorder(&self) -> Option<usize> {
        self.postorder
    }
}
