use std::path::Path;

use anyhow::bail;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{build_tree, file_display_name, load_graph},
    output::{print_json, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct TreeNodeOutput {
    address: String,
    postorder: usize,
    idom: Option<String>,
    depth: usize,
    children: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TreeOutput {
    file: String,
    entry: String,
    block_count: usize,
    passes: usize,
    nodes: Vec<TreeNodeOutput>,
}

pub fn run(path: &Path, format: &str, global: &GlobalOptions) -> anyhow::Result<()> {
    let cfg = load_graph(path)?;
    let tree = build_tree(&cfg, global)?;
    let name = file_display_name(path);

    match format {
        "json" => {
            let nodes = (0..tree.len())
                .rev()
                .filter_map(|po| tree.address(po).map(|address| (po, address)))
                .map(|(po, address)| TreeNodeOutput {
                    address: address.to_string(),
                    postorder: po,
                    idom: tree.immediate_dominator(address).map(|a| a.to_string()),
                    depth: tree.depth(address).unwrap_or_default(),
                    children: tree
                        .children(address)
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                })
                .collect();

            print_json(&TreeOutput {
                file: name,
                entry: tree.entry().to_string(),
                block_count: tree.len(),
                passes: tree.passes(),
                nodes,
            })?;
        }
        "dot" => {
            print!("{}", tree.to_dot(Some(&name)));
        }
        "text" => {
            println!("Dominator tree for {name}");
            println!(
                "Blocks: {}, Entry: {}, Passes: {}",
                tree.len(),
                tree.entry(),
                tree.passes()
            );
            println!();

            let mut tw = TabWriter::new(&[
                ("Block", Align::Left),
                ("PO", Align::Right),
                ("IDom", Align::Left),
                ("Depth", Align::Right),
                ("Children", Align::Left),
            ]);

            for po in (0..tree.len()).rev() {
                let Some(address) = tree.address(po) else {
                    continue;
                };
                let idom = tree
                    .immediate_dominator(address)
                    .map_or_else(|| "-".to_string(), |a| a.to_string());
                let depth = tree.depth(address).unwrap_or_default();
                let children: Vec<String> = tree
                    .children(address)
                    .iter()
                    .map(ToString::to_string)
                    .collect();

                tw.row(vec![
                    address.to_string(),
                    po.to_string(),
                    idom,
                    depth.to_string(),
                    if children.is_empty() {
                        "-".to_string()
                    } else {
                        children.join(", ")
                    },
                ]);
            }

            tw.print();
        }
        other => bail!("unknown format '{other}' (expected text, json, or dot)"),
    }

    Ok(())
}
