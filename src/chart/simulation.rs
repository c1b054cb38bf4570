use eframe::egui::Vec2;

use super::collide::{Boundary, max_overlap, resolve_collisions};
use super::config::SimulationConfig;
use super::entity::Entity;
use super::gravity::Gravity;
use super::quadtree::{QuadNode, QuadtreeCell, collect_quadtree_cells};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Idle,
    Running,
    Stopped,
}

impl SimulationState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub alpha: f32,
    pub corrections: usize,
}

/// Layout driver. The host calls [`Simulation::tick`] once per frame; each
/// tick relaxes every entity toward its target while resolving overlaps.
pub struct Simulation {
    entities: Vec<Entity>,
    boundary: Boundary,
    padding: f32,
    config: SimulationConfig,
    alpha: f32,
    state: SimulationState,
    ticks: usize,
    positions: Vec<Vec2>,
}

impl Simulation {
    pub fn new(
        entities: Vec<Entity>,
        boundary: Boundary,
        padding: f32,
        config: SimulationConfig,
    ) -> Self {
        Self {
            entities,
            boundary,
            padding,
            config,
            alpha: 0.0,
            state: SimulationState::Idle,
            ticks: 0,
            positions: Vec::new(),
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    /// Starts an idle simulation. Has no effect once it has run.
    pub fn start(&mut self) {
        if self.state == SimulationState::Idle {
            self.restart();
        }
    }

    pub fn restart(&mut self) {
        self.alpha = self.config.alpha_start;
        self.state = SimulationState::Running;
        tracing::debug!(
            entities = self.entities.len(),
            alpha = self.alpha,
            "simulation started"
        );
    }

    /// Cancels the run. Entities keep their last positions.
    pub fn stop(&mut self) {
        if self.state == SimulationState::Running {
            tracing::debug!(ticks = self.ticks, alpha = self.alpha, "simulation stopped");
        }
        self.alpha = 0.0;
        self.state = SimulationState::Stopped;
    }

    /// Decays alpha and advances one step. Returns `None` when not running or
    /// when alpha has just dropped below the threshold.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.state != SimulationState::Running {
            return None;
        }

        self.alpha *= self.config.alpha_decay;
        if self.alpha < self.config.alpha_min {
            self.alpha = 0.0;
            self.state = SimulationState::Stopped;
            tracing::debug!(ticks = self.ticks, "simulation converged");
            return None;
        }

        let corrections = self.advance(self.alpha);
        Some(TickReport {
            alpha: self.alpha,
            corrections,
        })
    }

    /// One transition at an explicit alpha, independent of the run state.
    pub fn step(&mut self, alpha: f32) -> &[Entity] {
        self.advance(alpha);
        &self.entities
    }

    /// Ticks until stopped or `max_ticks` is reached; returns the ticks run.
    pub fn run_to_convergence(&mut self, max_ticks: usize) -> usize {
        self.start();
        let mut count = 0;
        while count < max_ticks && self.tick().is_some() {
            count += 1;
        }
        count
    }

    fn advance(&mut self, alpha: f32) -> usize {
        let friction = self.config.friction;
        for entity in &mut self.entities {
            let velocity = (entity.position - entity.previous) * friction;
            entity.previous = entity.position;
            if velocity.is_finite() {
                entity.position += velocity;
            }
        }

        self.positions.clear();
        self.positions
            .extend(self.entities.iter().map(|entity| entity.position));

        let reach = self
            .entities
            .iter()
            .map(|entity| entity.radius)
            .fold(0.0_f32, f32::max)
            + self.padding;

        let mut corrections = 0usize;
        if let Some(tree) = QuadNode::build(&self.positions) {
            for index in 0..self.entities.len() {
                corrections += resolve_collisions(
                    &tree,
                    &mut self.entities,
                    index,
                    &self.boundary,
                    self.padding,
                    reach,
                );
            }
        }

        let gravity = Gravity::new(
            alpha,
            self.config.gravity_damping,
            self.boundary.center_y(),
        );
        for entity in &mut self.entities {
            gravity.apply(entity);
            self.boundary.clamp(entity);
        }

        self.ticks += 1;
        tracing::trace!(tick = self.ticks, alpha, corrections, "tick");
        corrections
    }

    pub fn max_overlap(&self) -> f32 {
        max_overlap(&self.entities, self.padding)
    }

    /// Cells of a quadtree over the current positions, for debug overlays.
    pub fn quadtree_cells(&self, cells: &mut Vec<QuadtreeCell>) {
        cells.clear();
        let positions = self
            .entities
            .iter()
            .map(|entity| entity.position)
            .collect::<Vec<_>>();
        if let Some(tree) = QuadNode::build(&positions) {
            collect_quadtree_cells(&tree, 0, cells);
        }
    }
}
