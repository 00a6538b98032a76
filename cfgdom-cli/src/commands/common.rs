use std::path::Path;

use anyhow::Context;
use cfgdom::{BuilderConfig, ControlFlowGraph, DominatorTree, DomTreeBuilder, Error};

use crate::{app::GlobalOptions, input::parse_graph};

/// Read and parse an edge-list file, then number it for the builder.
pub fn load_graph(path: &Path) -> anyhow::Result<ControlFlowGraph> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read graph: {}", path.display()))?;
    let mut cfg =
        parse_graph(&text).with_context(|| format!("failed to parse graph: {}", path.display()))?;

    let unreachable = cfg.number_postorder();
    if unreachable > 0 {
        log::warn!(
            "{} of {} blocks are not reachable from entry {}",
            unreachable,
            cfg.size(),
            cfg.entry()
        );
    }
    Ok(cfg)
}

/// Builder configuration selected by the global flags.
pub fn builder_config(global: &GlobalOptions) -> BuilderConfig {
    let config = if global.strict {
        BuilderConfig::strict()
    } else {
        BuilderConfig::default()
    };
    match global.max_passes {
        Some(limit) => config.with_max_passes(limit),
        None => config,
    }
}

/// Compute the dominator tree, naming the offending block when one cannot be resolved.
pub fn build_tree(cfg: &ControlFlowGraph, global: &GlobalOptions) -> anyhow::Result<DominatorTree> {
    let builder = DomTreeBuilder::with_config(builder_config(global));
    builder.build(cfg).map_err(|err| match err {
        Error::UnresolvableDominator { postorder } => {
            let block = cfg
                .nodes()
                .find(|node| node.postorder() == Some(postorder))
                .map(|node| node.address().to_string())
                .unwrap_or_else(|| "?".to_string());
            anyhow::Error::new(err)
                .context(format!("block {block} is not reachable from entry {}", cfg.entry()))
        }
        other => anyhow::Error::new(other).context("failed to compute dominator tree"),
    })
}

/// Display name of an input file.
pub fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
