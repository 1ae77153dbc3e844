//! Betweenness centrality over the module graph.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// Betweenness centrality via Brandes' algorithm over unweighted edges.
///
/// Scores are normalized by `(n-1)(n-2)` for directed graphs, matching the
/// convention used by standard graph toolkits. Graphs with fewer than three
/// nodes score 0.0 everywhere.
pub fn betweenness<N, E>(graph: &DiGraph<N, E>) -> HashMap<NodeIndex, f64> {
    let n = graph.node_count();
    let mut centrality: HashMap<NodeIndex, f64> =
        graph.node_indices().map(|idx| (idx, 0.0)).collect();
    if n < 3 {
        return centrality;
    }

    for source in graph.node_indices() {
        // Single-source shortest paths (BFS, unit weights)
        let mut stack: Vec<NodeIndex> = Vec::new();
        let mut predecessors: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
        let mut sigma: HashMap<NodeIndex, f64> = HashMap::new();
        let mut distance: HashMap<NodeIndex, i64> = HashMap::new();

        sigma.insert(source, 1.0);
        distance.insert(source, 0);

        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            stack.push(current);
            let current_distance = distance[&current];
            let current_sigma = sigma[&current];

            for neighbor in graph.neighbors_directed(current, Direction::Outgoing) {
                match distance.get(&neighbor) {
                    None => {
                        distance.insert(neighbor, current_distance + 1);
                        sigma.insert(neighbor, current_sigma);
                        predecessors.insert(neighbor, vec![current]);
                        queue.push_back(neighbor);
                    }
                    Some(&d) if d == current_distance + 1 => {
                        *sigma.entry(neighbor).or_insert(0.0) += current_sigma;
                        predecessors.entry(neighbor).or_default().push(current);
                    }
                    Some(_) => {}
                }
            }
        }

        // Dependency accumulation, farthest nodes first
        let mut delta: HashMap<NodeIndex, f64> = HashMap::new();
        while let Some(w) = stack.pop() {
            let w_share = (1.0 + delta.get(&w).copied().unwrap_or(0.0)) / sigma[&w];
            if let Some(preds) = predecessors.get(&w) {
                for &v in preds {
                    *delta.entry(v).or_insert(0.0) += sigma[&v] * w_share;
                }
            }
            if w != source {
                if let Some(score) = centrality.get_mut(&w) {
                    *score += delta.get(&w).copied().unwrap_or(0.0);
                }
            }
        }
    }

    let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
    for score in centrality.values_mut() {
        *score *= scale;
    }

    centrality
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(len: usize) -> (DiGraph<(), ()>, Vec<NodeIndex>) {
        let mut graph = DiGraph::new();
        let nodes: Vec<_> = (0..len).map(|_| graph.add_node(())).collect();
        for pair in nodes.windows(2) {
            graph.add_edge(pair[0], pair[1], ());
        }
        (graph, nodes)
    }

    #[test]
    fn middle_of_chain_scores_highest() {
        let (graph, nodes) = chain(3);
        let scores = betweenness(&graph);
        // Only the middle node lies on a shortest path between two others
        assert!(scores[&nodes[1]] > scores[&nodes[0]]);
        assert!(scores[&nodes[1]] > scores[&nodes[2]]);
        // One path through one interior node, scale 1/((3-1)(3-2))
        assert!((scores[&nodes[1]] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn endpoints_score_zero() {
        let (graph, nodes) = chain(4);
        let scores = betweenness(&graph);
        assert_eq!(scores[&nodes[0]], 0.0);
        assert_eq!(scores[&nodes[3]], 0.0);
    }

    #[test]
    fn tiny_graphs_are_all_zero() {
        let (graph, nodes) = chain(2);
        let scores = betweenness(&graph);
        assert_eq!(scores[&nodes[0]], 0.0);
        assert_eq!(scores[&nodes[1]], 0.0);
    }

    #[test]
    fn disconnected_nodes_score_zero() {
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b, ());
        let scores = betweenness(&graph);
        assert_eq!(scores[&c], 0.0);
    }
}
