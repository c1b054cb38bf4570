use eframe::egui::{Color32, FontId, Painter, Vec2};

use bubble_timeline::chart::{self, ChartError, Entity, label};

use super::super::{ChartCanvas, ViewModel};

/// Measures each label at its bubble's font size and trims it to the circle.
pub(super) fn fit_labels(painter: &Painter, entities: &[Entity]) -> Vec<String> {
    entities
        .iter()
        .map(|entity| {
            let char_count = entity.label.chars().count();
            if char_count == 0 {
                return String::new();
            }
            let galley = painter.layout_no_wrap(
                entity.label.clone(),
                FontId::proportional(label::font_size(entity.radius)),
                Color32::WHITE,
            );
            let symbol_width = label::symbol_width(galley.size().x, char_count);
            label::trim_label(&entity.label, symbol_width, entity.radius)
        })
        .collect()
}

impl ViewModel {
    /// Rebuilds the layout when settings changed or the canvas was resized.
    pub(in crate::app) fn ensure_layout(&mut self, size: Vec2) {
        let resized = self
            .canvas
            .as_ref()
            .is_none_or(|canvas| canvas.size != size);
        if !self.layout_dirty && !resized {
            return;
        }

        self.layout_revision = self.layout_revision.wrapping_add(1);
        self.search_match_cache = None;
        self.pressed = None;
        self.layout_dirty = false;

        match chart::layout(&self.records, size.x, size.y, &self.config) {
            Ok(mut simulation) => {
                simulation.start();
                let time_scale = chart::time_scale(&self.records, size.x, &self.config.margin);
                self.canvas = Some(ChartCanvas {
                    simulation,
                    time_scale,
                    size,
                    labels: None,
                    quadtree_cells: Vec::new(),
                });
            }
            Err(error @ ChartError::InvalidDimension { .. }) => {
                tracing::debug!("{error}");
                self.canvas = None;
            }
            Err(error) => {
                tracing::warn!("{error}");
                self.canvas = None;
            }
        }
    }
}
