#![no_main]

use cfgdom::{Address, BuilderConfig, ControlFlowGraph, DomTreeBuilder, Error};
use libfuzzer_sys::fuzz_target;

// First byte selects the block count, every following byte pair is an edge.
fuzz_target!(|data: &[u8]| {
    let Some((&head, rest)) = data.split_first() else {
        return;
    };
    let count = usize::from(head % 64) + 1;

    let mut cfg = ControlFlowGraph::new(Address::new(0));
    for index in 1..count {
        cfg.add_block(Address::new(index as u64));
    }
    for pair in rest.chunks_exact(2) {
        let from = Address::new(u64::from(pair[0]) % count as u64);
        let to = Address::new(u64::from(pair[1]) % count as u64);
        let _ = cfg.add_edge(from, to);
    }

    let unreachable = cfg.number_postorder();
    let builder = DomTreeBuilder::with_config(BuilderConfig::strict());
    match builder.build(&cfg) {
        Ok(tree) => {
            assert_eq!(unreachable, 0);
            assert_eq!(tree.len(), count);
            for (node, idom) in tree.iter() {
                assert!(tree.strictly_dominates(idom, node));
            }
        }
        Err(Error::UnresolvableDominator { postorder }) => {
            assert!(postorder < unreachable);
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
});
