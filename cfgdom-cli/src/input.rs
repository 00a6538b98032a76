//! Edge-list reader.
//!
//! One statement per line, `#` starts a comment:
//!
//! ```text
//! entry 0x1000          # optional, otherwise the first mentioned block
//! block 0x1040          # declares a block without edges
//! 0x1000 -> 0x1010 0x1020
//! 0x1010 -> 0x1030
//! ```
//!
//! Addresses are hex (`0x` prefix) or decimal. Blocks are created on first mention.

use std::collections::HashSet;

use anyhow::{bail, Context};
use cfgdom::{Address, ControlFlowGraph};

/// Parses an edge list into an unnumbered [`ControlFlowGraph`].
pub fn parse_graph(text: &str) -> anyhow::Result<ControlFlowGraph> {
    let mut entry: Option<Address> = None;
    let mut blocks: Vec<Address> = Vec::new();
    let mut seen: HashSet<Address> = HashSet::new();
    let mut edges: Vec<(Address, Address)> = Vec::new();

    let mut mention = |address: Address| {
        if seen.insert(address) {
            blocks.push(address);
        }
    };

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["entry", target] => {
                let address = parse_address(target, line_no)?;
                if let Some(previous) = entry.replace(address) {
                    bail!("line {line_no}: entry already set to {previous}");
                }
                mention(address);
            }
            ["block", target] => mention(parse_address(target, line_no)?),
            ["entry" | "block", ..] => {
                bail!("line {line_no}: '{}' takes exactly one address", tokens[0]);
            }
            [from, "->", targets @ ..] if !targets.is_empty() => {
                let from = parse_address(from, line_no)?;
                mention(from);
                for target in targets {
                    let to = parse_address(target, line_no)?;
                    mention(to);
                    edges.push((from, to));
                }
            }
            _ => bail!("line {line_no}: expected 'entry <addr>', 'block <addr>' or '<addr> -> <addr>...'"),
        }
    }

    let Some(&first) = blocks.first() else {
        bail!("graph has no blocks");
    };
    let entry = entry.unwrap_or(first);

    let mut cfg = ControlFlowGraph::new(entry);
    for &address in &blocks {
        cfg.add_block(address);
    }
    for (from, to) in edges {
        cfg.add_edge(from, to)?;
    }

    log::debug!(
        "parsed {} blocks and {} edges, entry {}",
        cfg.size(),
        cfg.edge_count(),
        cfg.entry()
    );
    Ok(cfg)
}

fn parse_address(token: &str, line_no: usize) -> anyhow::Result<Address> {
    token
        .parse::<Address>()
        .with_context(|| format!("line {line_no}: invalid address '{token}'"))
}
