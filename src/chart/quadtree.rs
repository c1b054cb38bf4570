use eframe::egui::{Vec2, vec2};

const QUADTREE_LEAF_CAPACITY: usize = 4;
const QUADTREE_MAX_DEPTH: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadBounds {
    pub center: Vec2,
    pub half_extent: f32,
}

impl QuadBounds {
    fn from_points(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for point in points.iter().filter(|point| point.is_finite()) {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let center = (min + max) * 0.5;
        let span_x = (max.x - min.x).max(1.0);
        let span_y = (max.y - min.y).max(1.0);
        let half_extent = (span_x.max(span_y) * 0.5) + 1.0;

        Some(Self {
            center,
            half_extent,
        })
    }

    pub fn min(self) -> Vec2 {
        self.center - vec2(self.half_extent, self.half_extent)
    }

    pub fn max(self) -> Vec2 {
        self.center + vec2(self.half_extent, self.half_extent)
    }

    /// Closed-interval overlap test against an axis-aligned box.
    pub fn intersects(self, min: Vec2, max: Vec2) -> bool {
        let own_min = self.min();
        let own_max = self.max();
        !(own_min.x > max.x || own_max.x < min.x || own_min.y > max.y || own_max.y < min.y)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = match quadrant {
            0 => vec2(-quarter, -quarter),
            1 => vec2(quarter, -quarter),
            2 => vec2(-quarter, quarter),
            _ => vec2(quarter, quarter),
        };

        Self {
            center: self.center + offset,
            half_extent: quarter,
        }
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        let right = point.x >= self.center.x;
        let lower = point.y >= self.center.y;
        match (right, lower) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        }
    }
}

/// Square-cell point quadtree over entity indices. Leaves hold up to
/// `QUADTREE_LEAF_CAPACITY` indices unless the depth limit is hit first.
pub struct QuadNode {
    pub bounds: QuadBounds,
    pub indices: Vec<usize>,
    pub children: [Option<Box<QuadNode>>; 4],
}

#[derive(Clone, Copy, Debug)]
pub struct QuadtreeCell {
    pub center: Vec2,
    pub half_extent: f32,
    pub depth: usize,
    pub is_leaf: bool,
}

impl QuadNode {
    /// Non-finite positions are left out of the tree.
    pub fn build(positions: &[Vec2]) -> Option<Self> {
        let bounds = QuadBounds::from_points(positions)?;
        let indices = (0..positions.len())
            .filter(|&index| positions[index].is_finite())
            .collect::<Vec<_>>();
        Some(Self::build_node(bounds, indices, positions, 0))
    }

    fn build_node(
        bounds: QuadBounds,
        indices: Vec<usize>,
        positions: &[Vec2],
        depth: usize,
    ) -> Self {
        let mut node = Self {
            bounds,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= QUADTREE_MAX_DEPTH || node.indices.len() <= QUADTREE_LEAF_CAPACITY {
            return node;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &node.indices {
            let quadrant = bounds.quadrant_for(positions[index]);
            buckets[quadrant].push(index);
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }

            let child_bounds = bounds.child(quadrant);
            node.children[quadrant] = Some(Box::new(Self::build_node(
                child_bounds,
                bucket,
                positions,
                depth + 1,
            )));
        }
        node.indices.clear();
        node
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|child| child.is_none())
    }

    /// Pre-order walk. Returning `true` from `visitor` skips that node's children.
    pub fn visit(&self, visitor: &mut impl FnMut(&QuadNode) -> bool) {
        if visitor(self) {
            return;
        }
        for child in self.children.iter().flatten() {
            child.visit(visitor);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.indices.len()
            + self
                .children
                .iter()
                .flatten()
                .map(|child| child.len())
                .sum::<usize>()
    }
}

pub fn collect_quadtree_cells(node: &QuadNode, depth: usize, cells: &mut Vec<QuadtreeCell>) {
    cells.push(QuadtreeCell {
        center: node.bounds.center,
        half_extent: node.bounds.half_extent,
        depth,
        is_leaf: node.is_leaf(),
    });

    for child in node.children.iter().flatten() {
        collect_quadtree_cells(child, depth + 1, cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(count: usize, spacing: f32) -> Vec<Vec2> {
        (0..count)
            .flat_map(|row| (0..count).map(move |col| vec2(col as f32, row as f32) * spacing))
            .collect()
    }

    #[test]
    fn empty_input_has_no_tree() {
        assert!(QuadNode::build(&[]).is_none());
        assert!(QuadNode::build(&[vec2(f32::NAN, 0.0)]).is_none());
    }

    #[test]
    fn every_index_lands_in_exactly_one_leaf() {
        let positions = grid(9, 10.0);
        let tree = QuadNode::build(&positions).expect("tree");
        assert_eq!(tree.len(), positions.len());

        let mut seen = vec![0usize; positions.len()];
        tree.visit(&mut |node| {
            for &index in &node.indices {
                seen[index] += 1;
                assert!(node.bounds.intersects(positions[index], positions[index]));
            }
            false
        });
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn pruned_visit_skips_far_regions() {
        let positions = grid(16, 20.0);
        let tree = QuadNode::build(&positions).expect("tree");

        let query_min = vec2(-5.0, -5.0);
        let query_max = vec2(25.0, 25.0);
        let mut visited = Vec::new();
        tree.visit(&mut |node| {
            visited.extend(node.indices.iter().copied());
            !node.bounds.intersects(query_min, query_max)
        });

        assert!(visited.contains(&0));
        assert!(visited.len() < positions.len() / 4);
    }

    #[test]
    fn coincident_points_stop_at_depth_limit() {
        let positions = vec![vec2(5.0, 5.0); 40];
        let tree = QuadNode::build(&positions).expect("tree");
        assert_eq!(tree.len(), 40);

        let mut cells = Vec::new();
        collect_quadtree_cells(&tree, 0, &mut cells);
        assert!(cells.iter().all(|cell| cell.depth <= QUADTREE_MAX_DEPTH));
    }
}
