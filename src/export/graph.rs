//! Torus graph dumps: GraphViz DOT, adjacency list and node coordinates.

use std::collections::BTreeSet;

use crate::topology::summary::format_dimensions;
use crate::topology::TorusTopology;

/// GraphViz rendering, one edge per neighbor pair
///
/// 2-D tori get pinned grid positions so `neato` draws them as a grid.
pub fn render_dot(topology: &TorusTopology) -> String {
    let mut dot = String::new();
    dot.push_str("graph Torus {\n");
    dot.push_str("  layout=neato;\n");
    dot.push_str("  overlap=false;\n");
    dot.push_str("  splines=true;\n");
    dot.push_str("  node [shape=circle, style=filled, fillcolor=lightblue];\n");

    let grid = topology.num_dimensions() == 2;
    for node in topology.nodes() {
        if grid {
            let coords = node.coordinates();
            dot.push_str(&format!(
                "  {} [pos=\"{},{}!\", label=\"{}\"];\n",
                node.id(),
                coords[0],
                coords[1],
                node.id()
            ));
        } else {
            dot.push_str(&format!("  {} [label=\"{}\"];\n", node.id(), node.id()));
        }
    }

    for node in topology.nodes() {
        // Extent-2 dimensions list the same neighbor twice.
        let higher: BTreeSet<usize> = node
            .neighbors()
            .iter()
            .copied()
            .filter(|&n| n > node.id())
            .collect();
        for neighbor in higher {
            dot.push_str(&format!("  {} -- {};\n", node.id(), neighbor));
        }
    }

    dot.push_str("}\n");
    dot
}

/// Adjacency list with a descriptive comment header
pub fn render_adjacency_list(topology: &TorusTopology) -> String {
    let mut out = String::new();
    out.push_str("# Torus Adjacency List\n");
    out.push_str(&format!(
        "# Dimensions: {}\n",
        format_dimensions(topology.dimensions(), "x")
    ));
    out.push_str(&format!("# Total Nodes: {}\n", topology.num_nodes()));
    out.push_str("# Format: node_id: neighbor1 neighbor2 ...\n\n");

    for node in topology.nodes() {
        out.push_str(&format!("{}:", node.id()));
        for neighbor in node.neighbors() {
            out.push_str(&format!(" {}", neighbor));
        }
        out.push('\n');
    }
    out
}

/// `node_id,dim0,...,num_neighbors` table
pub fn render_coordinates_csv(topology: &TorusTopology) -> String {
    let mut out = String::from("node_id");
    for d in 0..topology.num_dimensions() {
        out.push_str(&format!(",dim{}", d));
    }
    out.push_str(",num_neighbors\n");

    for node in topology.nodes() {
        out.push_str(&node.id().to_string());
        for c in node.coordinates() {
            out.push_str(&format!(",{}", c));
        }
        out.push_str(&format!(",{}\n", node.neighbors().len()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_edges_emitted_once() {
        let torus = TorusTopology::from_dimensions(&[4, 4]).unwrap();
        let dot = render_dot(&torus);
        let edges: Vec<&str> = dot.lines().filter(|l| l.contains(" -- ")).collect();
        // 16 nodes x 4 neighbors / 2
        assert_eq!(edges.len(), 32);
        assert!(dot.contains("  5 [pos=\"1,1!\", label=\"5\"];"));
        assert!(dot.contains("  0 -- 3;"));
        assert!(!dot.contains("  3 -- 0;"));
        assert!(dot.starts_with("graph Torus {\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_dot_collapses_extent_two_links() {
        let torus = TorusTopology::from_dimensions(&[2, 3, 2]).unwrap();
        let dot = render_dot(&torus);
        assert_eq!(dot.matches("  0 -- 1;").count(), 1);
        // no grid positions outside 2-D
        assert!(!dot.contains("pos="));
        assert!(dot.contains("  0 [label=\"0\"];"));
    }

    #[test]
    fn test_adjacency_list_format() {
        let torus = TorusTopology::from_dimensions(&[4, 2]).unwrap();
        let text = render_adjacency_list(&torus);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# Torus Adjacency List");
        assert_eq!(lines[1], "# Dimensions: 4x2");
        assert_eq!(lines[2], "# Total Nodes: 8");
        assert_eq!(lines[3], "# Format: node_id: neighbor1 neighbor2 ...");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "0: 3 1 4 4");
        assert_eq!(lines.len(), 5 + 8);
    }

    #[test]
    fn test_coordinates_csv() {
        let torus = TorusTopology::from_dimensions(&[3, 2]).unwrap();
        let text = render_coordinates_csv(&torus);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "node_id,dim0,dim1,num_neighbors");
        assert_eq!(lines[5], "4,1,1,4");
        assert_eq!(lines.len(), 7);
    }
}
