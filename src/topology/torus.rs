//! Torus addressing model.
//!
//! Ranks are mapped to coordinates with a mixed-radix encoding whose radices
//! are the dimension extents, dimension 0 varying fastest. Nodes live in a
//! dense vector indexed by rank and refer to each other by rank only.

use log::{debug, info};

use crate::topology::types::{Coordinate, Direction, Node, TopologyError, TorusConfig};

/// An immutable D-dimensional torus
#[derive(Debug, Clone)]
pub struct TorusTopology {
    config: TorusConfig,
    nodes: Vec<Node>,
}

impl TorusTopology {
    /// Build the torus described by `config`
    ///
    /// # Returns
    /// * `Ok(TorusTopology)` with every node and its 2·D neighbor slots populated
    /// * `Err(TopologyError::InvalidConfig)` if the configuration is rejected
    pub fn new(config: TorusConfig) -> Result<Self, TopologyError> {
        let total_nodes = config.validate()?;
        info!(
            "Generating torus {:?} ({} nodes, {} dimensions)",
            config.dimensions,
            total_nodes,
            config.num_dimensions()
        );
        Ok(Self::build(config, total_nodes))
    }

    /// Build a torus with the default link parameters
    pub fn from_dimensions(dimensions: &[usize]) -> Result<Self, TopologyError> {
        Self::new(TorusConfig::with_dimensions(dimensions.to_vec()))
    }

    fn build(config: TorusConfig, total_nodes: usize) -> Self {
        let dims = &config.dimensions;
        let nodes = (0..total_nodes)
            .map(|rank| {
                let coordinates = decompose(dims, rank);
                let mut neighbors = Vec::with_capacity(2 * dims.len());
                for dim in 0..dims.len() {
                    for direction in Direction::ALL {
                        neighbors.push(shift(dims, &coordinates, dim, direction.offset()));
                    }
                }
                Node::new(rank, coordinates, neighbors)
            })
            .collect::<Vec<_>>();

        debug!("Connected {} nodes with {} neighbor slots each", nodes.len(), 2 * dims.len());

        Self { config, nodes }
    }

    /// Build without validation so degenerate shapes can be exercised
    #[cfg(test)]
    pub(crate) fn unchecked(config: TorusConfig) -> Self {
        let total_nodes = config.total_nodes().unwrap_or(0);
        Self::build(config, total_nodes)
    }

    pub fn config(&self) -> &TorusConfig {
        &self.config
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.config.dimensions
    }

    pub fn num_dimensions(&self) -> usize {
        self.config.dimensions.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Look up a node by rank
    pub fn node(&self, rank: usize) -> Result<&Node, TopologyError> {
        self.nodes.get(rank).ok_or(TopologyError::OutOfRange {
            rank,
            total: self.nodes.len(),
        })
    }

    /// Convert a linear rank to its torus coordinate
    pub fn rank_to_coordinates(&self, rank: usize) -> Result<Coordinate, TopologyError> {
        self.check_rank(rank)?;
        Ok(decompose(self.dimensions(), rank))
    }

    /// Convert a torus coordinate back to its linear rank
    pub fn coordinates_to_rank(&self, coordinates: &[usize]) -> Result<usize, TopologyError> {
        let dims = self.dimensions();
        if coordinates.len() != dims.len() {
            return Err(TopologyError::InvalidCoordinate(format!(
                "expected {} components, got {}",
                dims.len(),
                coordinates.len()
            )));
        }
        for (d, (&c, &extent)) in coordinates.iter().zip(dims).enumerate() {
            if c >= extent {
                return Err(TopologyError::InvalidCoordinate(format!(
                    "component {} is {} but dimension {} has extent {}",
                    d, c, d, extent
                )));
            }
        }
        Ok(compose(dims, coordinates))
    }

    /// Rank reached by moving `offset` positions along `dim`, wrapping around
    pub fn neighbor(&self, rank: usize, dim: usize, offset: isize) -> Result<usize, TopologyError> {
        self.check_rank(rank)?;
        if dim >= self.num_dimensions() {
            return Err(TopologyError::DimensionOutOfRange {
                dim,
                dims: self.num_dimensions(),
            });
        }
        let coordinates = decompose(self.dimensions(), rank);
        Ok(shift(self.dimensions(), &coordinates, dim, offset))
    }

    /// Minimal wraparound Manhattan distance between two ranks
    pub fn distance(&self, rank1: usize, rank2: usize) -> Result<usize, TopologyError> {
        let a = self.node(rank1)?;
        let b = self.node(rank2)?;
        Ok(coordinate_distance(self.dimensions(), a.coordinates(), b.coordinates()))
    }

    /// Distance between two nodes already held by the caller
    pub fn node_distance(&self, a: &Node, b: &Node) -> usize {
        coordinate_distance(self.dimensions(), a.coordinates(), b.coordinates())
    }

    fn check_rank(&self, rank: usize) -> Result<(), TopologyError> {
        if rank < self.nodes.len() {
            Ok(())
        } else {
            Err(TopologyError::OutOfRange {
                rank,
                total: self.nodes.len(),
            })
        }
    }
}

fn decompose(dims: &[usize], rank: usize) -> Coordinate {
    let mut remaining = rank;
    dims.iter()
        .map(|&extent| {
            let c = remaining % extent;
            remaining /= extent;
            c
        })
        .collect()
}

fn compose(dims: &[usize], coordinates: &[usize]) -> usize {
    let mut rank = 0;
    let mut multiplier = 1;
    for (&c, &extent) in coordinates.iter().zip(dims) {
        rank += c * multiplier;
        multiplier *= extent;
    }
    rank
}

fn shift(dims: &[usize], coordinates: &[usize], dim: usize, offset: isize) -> usize {
    let extent = dims[dim] as isize;
    // Normalize first so negative offsets never reach the modulo.
    let step = offset.rem_euclid(extent);
    let mut moved = coordinates.to_vec();
    moved[dim] = ((coordinates[dim] as isize + step) % extent) as usize;
    compose(dims, &moved)
}

fn coordinate_distance(dims: &[usize], a: &[usize], b: &[usize]) -> usize {
    dims.iter()
        .zip(a.iter().zip(b))
        .map(|(&extent, (&x, &y))| {
            let diff = x.abs_diff(y);
            diff.min(extent - diff)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_every_rank() {
        for dims in [vec![8, 8], vec![4, 4, 4], vec![16, 4], vec![3, 5, 2], vec![7]] {
            let torus = TorusTopology::from_dimensions(&dims).unwrap();
            for rank in 0..torus.num_nodes() {
                let coords = torus.rank_to_coordinates(rank).unwrap();
                assert_eq!(torus.coordinates_to_rank(&coords).unwrap(), rank);
            }
        }
    }

    #[test]
    fn test_dimension_zero_varies_fastest() {
        let torus = TorusTopology::from_dimensions(&[4, 3]).unwrap();
        assert_eq!(torus.rank_to_coordinates(1).unwrap(), vec![1, 0]);
        assert_eq!(torus.rank_to_coordinates(4).unwrap(), vec![0, 1]);
        assert_eq!(torus.rank_to_coordinates(11).unwrap(), vec![3, 2]);
    }

    #[test]
    fn test_neighbor_wraparound() {
        let torus = TorusTopology::from_dimensions(&[8, 8]).unwrap();
        assert_eq!(torus.neighbor(0, 0, -1).unwrap(), 7);
        assert_eq!(torus.neighbor(7, 0, 1).unwrap(), 0);
        assert_eq!(torus.neighbor(0, 1, -1).unwrap(), 56);
        assert_eq!(torus.neighbor(9, 1, 1).unwrap(), 17);
        assert_eq!(torus.neighbor(3, 0, -9).unwrap(), 2);
    }

    #[test]
    fn test_neighbor_table_matches_lookup() {
        let torus = TorusTopology::from_dimensions(&[4, 3, 2]).unwrap();
        for node in torus.nodes() {
            assert_eq!(node.neighbors().len(), 6);
            for dim in 0..3 {
                assert_eq!(
                    node.neighbor(dim, Direction::Negative).unwrap(),
                    torus.neighbor(node.id(), dim, -1).unwrap()
                );
                assert_eq!(
                    node.neighbor(dim, Direction::Positive).unwrap(),
                    torus.neighbor(node.id(), dim, 1).unwrap()
                );
            }
            // Extent 2: both directions reach the same node.
            assert_eq!(node.neighbors()[4], node.neighbors()[5]);
        }
    }

    #[test]
    fn test_distance_properties() {
        let torus = TorusTopology::from_dimensions(&[8, 5]).unwrap();
        for a in 0..torus.num_nodes() {
            assert_eq!(torus.distance(a, a).unwrap(), 0);
            for b in 0..torus.num_nodes() {
                let d = torus.distance(a, b).unwrap();
                assert_eq!(d, torus.distance(b, a).unwrap());
                assert!(d <= 8 / 2 + 5 / 2);
            }
        }
        // (7,0) -> (0,1) wraps in dimension 0
        assert_eq!(torus.distance(7, 8).unwrap(), 2);
    }

    #[test]
    fn test_single_dimension_contribution() {
        let torus = TorusTopology::from_dimensions(&[8, 5, 2]).unwrap();
        // Pairs differing only in one coordinate
        assert_eq!(torus.distance(0, 4).unwrap(), 4);
        assert_eq!(torus.distance(0, 5).unwrap(), 3);
        assert_eq!(torus.distance(0, 2 * 8).unwrap(), 2);
        assert_eq!(torus.distance(0, 3 * 8).unwrap(), 2);
        assert_eq!(torus.distance(0, 40).unwrap(), 1);
        for (d, &extent) in torus.dimensions().iter().enumerate() {
            for offset in 0..extent as isize {
                let other = torus.neighbor(0, d, offset).unwrap();
                assert!(torus.distance(0, other).unwrap() <= extent / 2);
            }
        }
    }

    #[test]
    fn test_out_of_range_lookups() {
        let torus = TorusTopology::from_dimensions(&[4, 4]).unwrap();
        assert_eq!(
            torus.node(16).unwrap_err(),
            TopologyError::OutOfRange { rank: 16, total: 16 }
        );
        assert!(torus.rank_to_coordinates(99).is_err());
        assert!(torus.distance(0, 16).is_err());
        assert!(matches!(
            torus.neighbor(0, 2, 1),
            Err(TopologyError::DimensionOutOfRange { dim: 2, dims: 2 })
        ));
        assert!(torus.coordinates_to_rank(&[1]).is_err());
        assert!(torus.coordinates_to_rank(&[1, 4]).is_err());
    }

    #[test]
    fn test_invalid_construction() {
        assert!(TorusTopology::from_dimensions(&[]).is_err());
        assert!(TorusTopology::from_dimensions(&[8, 1]).is_err());
        assert!(TorusTopology::from_dimensions(&[0]).is_err());
    }
}
