use std::path::Path;

use anyhow::bail;
use cfgdom::{Address, ControlFlowGraph};
use serde::Serialize;

use crate::{
    commands::common::{file_display_name, load_graph},
    output::{print_json, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct PostorderEntry {
    address: String,
    postorder: usize,
    reachable: bool,
}

#[derive(Debug, Serialize)]
struct PostorderOutput {
    file: String,
    entry: String,
    block_count: usize,
    unreachable: usize,
    blocks: Vec<PostorderEntry>,
}

/// Blocks ordered by ascending postorder index.
fn numbered_blocks(cfg: &ControlFlowGraph) -> Vec<(usize, Address)> {
    let mut blocks: Vec<(usize, Address)> = cfg
        .nodes()
        .filter_map(|node| node.postorder().map(|po| (po, node.address())))
        .collect();
    blocks.sort_unstable();
    blocks
}

pub fn run(path: &Path, format: &str) -> anyhow::Result<()> {
    let cfg = load_graph(path)?;
    let name = file_display_name(path);

    // Unreachable blocks take the lowest indices
    let reachable = cfg.reverse_postorder().len();
    let unreachable = cfg.size() - reachable;

    match format {
        "json" => {
            let blocks = numbered_blocks(&cfg)
                .into_iter()
                .map(|(po, address)| PostorderEntry {
                    address: address.to_string(),
                    postorder: po,
                    reachable: po >= unreachable,
                })
                .collect();

            print_json(&PostorderOutput {
                file: name,
                entry: cfg.entry().to_string(),
                block_count: cfg.size(),
                unreachable,
                blocks,
            })?;
        }
        "dot" => {
            print!("{}", cfg.to_dot(Some(&name)));
        }
        "text" => {
            println!("Postorder numbering for {name}");
            println!(
                "Blocks: {}, Edges: {}, Entry: {}, Unreachable: {}",
                cfg.size(),
                cfg.edge_count(),
                cfg.entry(),
                unreachable
            );
            println!();

            let mut tw = TabWriter::new(&[
                ("PO", Align::Right),
                ("Block", Align::Left),
                ("Successors", Align::Left),
                ("Note", Align::Left),
            ]);

            for (po, address) in numbered_blocks(&cfg) {
                let successors: Vec<String> =
                    cfg.edges_from(address).map(|a| a.to_string()).collect();
                let note = if po < unreachable {
                    "unreachable"
                } else if address == cfg.entry() {
                    "entry"
                } else {
                    ""
                };

                tw.row(vec![
                    po.to_string(),
                    address.to_string(),
                    if successors.is_empty() {
                        "(exit)".to_string()
                    } else {
                        successors.join(", ")
                    },
                    note.to_string(),
                ]);
            }

            tw.print();
        }
        other => bail!("unknown format '{other}' (expected text, json, or dot)"),
    }

    Ok(())
}
