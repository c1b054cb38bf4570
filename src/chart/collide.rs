use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use super::entity::Entity;
use super::error::ChartError;
use super::quadtree::QuadNode;

const COINCIDENT_EPSILON: f32 = 1e-6;

/// Region entities are kept inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    pub width: f32,
    pub height: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
    pub clamp_right_edge: bool,
}

impl Boundary {
    pub fn center_y(&self) -> f32 {
        self.height * 0.5
    }

    /// Keeps the circle inside the drawable band above the bottom margin. When
    /// the band is thinner than the circle the top edge wins.
    pub fn clamp(&self, entity: &mut Entity) {
        if !entity.position.is_finite() {
            entity.position = vec2(entity.target_x, self.center_y());
            entity.previous = entity.position;
        }

        let radius = entity.radius.max(0.0);
        let position = &mut entity.position;
        let ceiling = self.top_margin + radius;
        position.y = ceiling.max((self.height - self.bottom_margin - radius).min(position.y));
        position.x = if self.clamp_right_edge {
            radius.max((self.width - radius).min(position.x))
        } else {
            radius.max(position.x)
        };
    }

    pub fn contains(&self, entity: &Entity) -> bool {
        let Vec2 { x, y } = entity.position;
        let radius = entity.radius;
        let ceiling = self.top_margin + radius;
        let floor = self.height - self.bottom_margin - radius;
        let within_y = if floor >= ceiling {
            y >= ceiling && y <= floor
        } else {
            y == ceiling
        };
        let within_x =
            x >= radius && (!self.clamp_right_edge || x <= (self.width - radius).max(radius));
        within_y && within_x
    }
}

fn coincident_direction(subject: usize, other: usize) -> Vec2 {
    let angle = ((subject as f32) * 0.618_034 + (other as f32) * 0.414_214 + 0.11) * TAU;
    vec2(angle.cos(), angle.sin())
}

/// Clamps `subject` to the boundary, then pushes it apart from every entity
/// found in quadtree cells overlapping its search box. Each overlapping pair
/// splits the correction evenly, so the pair's combined position is unchanged.
///
/// The search box is the subject's bounding box grown by `reach`, which must
/// cover the largest neighbour radius plus padding for no overlap to be missed.
///
/// Returns the number of pairs that were corrected.
pub fn resolve_collisions(
    tree: &QuadNode,
    entities: &mut [Entity],
    subject: usize,
    boundary: &Boundary,
    padding: f32,
    reach: f32,
) -> usize {
    boundary.clamp(&mut entities[subject]);

    let radius = entities[subject].radius;
    if radius <= 0.0 {
        return 0;
    }
    let extent = radius + reach.max(0.0);
    let center = entities[subject].position;
    let box_min = center - vec2(extent, extent);
    let box_max = center + vec2(extent, extent);

    let mut corrections = 0usize;
    tree.visit(&mut |node| {
        if !node.bounds.intersects(box_min, box_max) {
            return true;
        }
        for &other in &node.indices {
            if other == subject || other >= entities.len() {
                continue;
            }

            let other_radius = entities[other].radius;
            if other_radius <= 0.0 {
                continue;
            }

            let mut delta = entities[subject].position - entities[other].position;
            let mut distance = delta.length();
            let min_distance = entities[subject].radius + other_radius + padding;
            if distance.is_nan() || distance >= min_distance {
                continue;
            }

            if distance < COINCIDENT_EPSILON {
                let error = ChartError::DegenerateGeometry {
                    subject,
                    other,
                    at: entities[subject].position,
                };
                tracing::trace!(%error);
                delta = coincident_direction(subject, other) * COINCIDENT_EPSILON;
                distance = COINCIDENT_EPSILON;
            }

            let shift = delta * ((distance - min_distance) / distance * 0.5);
            entities[subject].position -= shift;
            entities[other].position += shift;
            corrections += 1;
        }
        false
    });

    corrections
}

/// Largest amount by which any pair is closer than `r_a + r_b + padding`.
pub fn max_overlap(entities: &[Entity], padding: f32) -> f32 {
    let positions = entities
        .iter()
        .map(|entity| entity.position)
        .collect::<Vec<_>>();
    let Some(tree) = QuadNode::build(&positions) else {
        return 0.0;
    };
    let max_radius = entities
        .iter()
        .map(|entity| entity.radius)
        .fold(0.0_f32, f32::max);

    let mut worst = 0.0_f32;
    for (index, entity) in entities.iter().enumerate() {
        if entity.radius <= 0.0 {
            continue;
        }
        let reach = entity.radius + max_radius + padding;
        let box_min = entity.position - vec2(reach, reach);
        let box_max = entity.position + vec2(reach, reach);

        tree.visit(&mut |node| {
            if !node.bounds.intersects(box_min, box_max) {
                return true;
            }
            for &other in &node.indices {
                if other <= index || entities[other].radius <= 0.0 {
                    continue;
                }
                let required = entity.radius + entities[other].radius + padding;
                worst = worst.max(required - entity.distance_to(&entities[other]));
            }
            false
        });
    }
    worst
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::Record;

    fn boundary() -> Boundary {
        Boundary {
            width: 400.0,
            height: 300.0,
            top_margin: 0.0,
            bottom_margin: 25.0,
            clamp_right_edge: true,
        }
    }

    fn entity_at(x: f32, y: f32, radius: f32) -> Entity {
        let record = Record::new(
            NaiveDate::from_ymd_opt(2014, 3, 1).expect("valid date"),
            radius as f64,
            "engine",
        );
        let mut entity = Entity::from_record(&record, 0, 1.0, x, y, 0.0);
        entity.position = vec2(x, y);
        entity.previous = entity.position;
        entity
    }

    fn resolve_all(entities: &mut [Entity], padding: f32) -> usize {
        let positions = entities.iter().map(|e| e.position).collect::<Vec<_>>();
        let tree = QuadNode::build(&positions).expect("tree");
        let reach = entities.iter().map(|e| e.radius).fold(0.0, f32::max) + padding;
        (0..entities.len())
            .map(|index| resolve_collisions(&tree, entities, index, &boundary(), padding, reach))
            .sum()
    }

    #[test]
    fn overlapping_pair_is_separated_symmetrically() {
        let mut entities = vec![entity_at(100.0, 100.0, 10.0), entity_at(110.0, 100.0, 10.0)];
        let midpoint = (entities[0].position + entities[1].position) * 0.5;

        let corrections = resolve_all(&mut entities, 2.0);

        assert_eq!(corrections, 1);
        assert!((entities[0].distance_to(&entities[1]) - 22.0).abs() < 1e-3);
        let after = (entities[0].position + entities[1].position) * 0.5;
        assert!((after - midpoint).length() < 1e-4);
    }

    #[test]
    fn small_subject_finds_large_neighbour_outside_its_box() {
        let mut entities = vec![entity_at(100.0, 100.0, 2.0), entity_at(125.0, 100.0, 30.0)];
        let positions = entities.iter().map(|e| e.position).collect::<Vec<_>>();
        let tree = QuadNode::build(&positions).expect("tree");

        let corrections = resolve_collisions(&tree, &mut entities, 0, &boundary(), 0.0, 30.0);
        assert_eq!(corrections, 1);
        assert!((entities[0].distance_to(&entities[1]) - 32.0).abs() < 1e-3);
    }

    #[test]
    fn distant_pair_is_untouched() {
        let mut entities = vec![entity_at(50.0, 100.0, 10.0), entity_at(200.0, 100.0, 10.0)];
        assert_eq!(resolve_all(&mut entities, 5.0), 0);
        assert_eq!(entities[0].position, vec2(50.0, 100.0));
        assert_eq!(entities[1].position, vec2(200.0, 100.0));
    }

    #[test]
    fn coincident_centres_separate_without_nan() {
        let mut entities = vec![entity_at(150.0, 150.0, 10.0), entity_at(150.0, 150.0, 10.0)];
        resolve_all(&mut entities, 0.0);

        assert!(entities.iter().all(|e| e.position.is_finite()));
        assert!(entities[0].distance_to(&entities[1]) > 19.0);
    }

    #[test]
    fn subject_is_clamped_before_checking_neighbours() {
        let mut entities = vec![entity_at(-40.0, 400.0, 15.0)];
        resolve_all(&mut entities, 0.0);
        assert_eq!(entities[0].position, vec2(15.0, 260.0));
    }

    #[test]
    fn right_edge_clamp_is_optional() {
        let mut open = boundary();
        open.clamp_right_edge = false;

        let mut entity = entity_at(900.0, 100.0, 10.0);
        open.clamp(&mut entity);
        assert_eq!(entity.position.x, 900.0);

        boundary().clamp(&mut entity);
        assert_eq!(entity.position.x, 390.0);
    }

    #[test]
    fn non_finite_position_is_reset_to_target() {
        let mut entity = entity_at(120.0, 100.0, 10.0);
        entity.position = vec2(f32::NAN, 3.0);
        boundary().clamp(&mut entity);
        assert_eq!(entity.position, vec2(120.0, 150.0));
    }

    #[test]
    fn max_overlap_reports_worst_pair() {
        let entities = vec![
            entity_at(100.0, 100.0, 10.0),
            entity_at(115.0, 100.0, 10.0),
            entity_at(300.0, 100.0, 10.0),
        ];
        assert!((max_overlap(&entities, 0.0) - 5.0).abs() < 1e-4);
        assert!(max_overlap(&entities[2..], 0.0) <= 0.0);
    }
}
