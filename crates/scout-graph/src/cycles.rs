//! Simple-cycle enumeration for the module graph.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// Upper bound on reported cycles; large tangles are truncated, not an error.
const MAX_CYCLES: usize = 100;

/// Enumerate simple cycles by DFS, one search rooted at each node.
///
/// Each cycle is reported once, as the node sequence starting from its
/// lowest-index member. A search rooted at node `s` only visits nodes with
/// index >= `s`, which is what keeps rotations of the same cycle from being
/// reported again from a later root.
pub fn simple_cycles<N, E>(graph: &DiGraph<N, E>) -> Vec<Vec<NodeIndex>> {
    let mut cycles = Vec::new();
    let mut on_path = vec![false; graph.node_count()];

    for start in graph.node_indices() {
        if cycles.len() >= MAX_CYCLES {
            break;
        }
        let mut path = vec![start];
        on_path[start.index()] = true;
        search(graph, start, start, &mut path, &mut on_path, &mut cycles);
        on_path[start.index()] = false;
    }

    cycles
}

fn search<N, E>(
    graph: &DiGraph<N, E>,
    start: NodeIndex,
    current: NodeIndex,
    path: &mut Vec<NodeIndex>,
    on_path: &mut [bool],
    cycles: &mut Vec<Vec<NodeIndex>>,
) {
    for next in graph.neighbors_directed(current, Direction::Outgoing) {
        if cycles.len() >= MAX_CYCLES {
            return;
        }
        if next == start {
            cycles.push(path.clone());
            continue;
        }
        if next.index() < start.index() || on_path[next.index()] {
            continue;
        }
        path.push(next);
        on_path[next.index()] = true;
        search(graph, start, next, path, on_path, cycles);
        on_path[next.index()] = false;
        path.pop();
    }
}
