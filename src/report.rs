//! Report rendering over a resolved node set
//!
//! Consumes only the data the graph exposes: the sorted node list, the
//! leaf set, per-leaf hierarchies, the pruned leaf set and its rendered
//! import list. The graph file is a flat `N,`/`E,` line listing suitable
//! for external graph-visualization tooling.

use crate::error::Result;
use crate::graph::NodeSet;
use crate::uber::as_import_list;
use std::fmt::Write;

/// Render the textual walk report
pub fn render_report(set: &NodeSet, prefix: &str) -> Result<String> {
    let mut out = String::new();

    let sorted = set.sorted();
    writeln!(&mut out, "Nodes: {}", sorted.len()).ok();
    for node in &sorted {
        writeln!(&mut out, "{}", node.location()).ok();
    }
    writeln!(&mut out).ok();

    let leaves = set.leaf_nodes();
    writeln!(&mut out, "Leaves: {}", leaves.len()).ok();
    for leaf in &leaves {
        writeln!(&mut out, "{}", leaf.location()).ok();
    }
    writeln!(&mut out).ok();

    writeln!(&mut out, "Hierarchy:").ok();
    for leaf in &leaves {
        for (depth, node) in set.hierarchy(leaf) {
            writeln!(&mut out, "{}{}", " ".repeat(depth), node.location()).ok();
        }
    }
    writeln!(&mut out).ok();

    let remotes = set.remote_nodes();
    let pruned = NodeSet::prune_leaf_nodes(&leaves, &remotes);
    writeln!(&mut out, "Unique Leaves: {}", pruned.len()).ok();
    for node in &pruned {
        writeln!(&mut out, "{}", node.location()).ok();
    }
    writeln!(&mut out).ok();

    writeln!(&mut out, "As Import List").ok();
    writeln!(&mut out, "{}", as_import_list(&pruned, prefix)?).ok();

    Ok(out)
}

/// Render the graph file: one `N,location,namespace` line per node, then
/// one `E,source,target` line per recorded edge, in registry order
pub fn render_graph(set: &NodeSet) -> String {
    let mut out = String::new();
    for node in set.iter() {
        writeln!(
            &mut out,
            "N,{},{}",
            node.location(),
            node.target_namespace()
        )
        .ok();
    }
    for edge in set.edges() {
        writeln!(&mut out, "E,{},{}", edge.source, edge.target).ok();
    }
    out
}
