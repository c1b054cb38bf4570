use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use bubble_timeline::chart::{MonthPalette, label};

use super::super::render_utils::{
    AXIS_COLOR, BACKGROUND, blend_color, chart_to_screen, dim_color, draw_quadtree_cells,
    label_color,
};
use super::super::{SearchMatchCache, ViewModel};
use super::build::fit_labels;
use super::interaction::draw_tooltip;

const AXIS_TICK_SPACING: f32 = 90.0;
const AXIS_TICK_LENGTH: f32 = 5.0;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let search_query = self.search.trim();
        if search_query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.layout_revision == self.layout_revision
            && cached.query == search_query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let canvas = self.canvas.as_ref()?;
        let matcher = SkimMatcherV2::default();
        let matches = canvas
            .simulation
            .entities()
            .iter()
            .enumerate()
            .filter_map(|(index, entity)| {
                fuzzy_match_score(&matcher, &entity.label, search_query).map(|_| index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: search_query.to_owned(),
            layout_revision: self.layout_revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_chart(&mut self, ui: &mut Ui) {
        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        self.ensure_layout(rect.size());

        let search_matches = self.cached_search_matches();
        let search_active = search_matches
            .as_ref()
            .is_some_and(|matches| !matches.is_empty());
        let live_simulation = self.live_simulation;
        let show_quadtree_overlay = self.show_quadtree_overlay;
        let margin = self.config.margin;
        let pressed = self.pressed;

        let Some(canvas) = self.canvas.as_mut() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "The chart area is too small to lay out.",
                FontId::proportional(14.0),
                Color32::from_gray(200),
            );
            return;
        };

        if live_simulation && canvas.simulation.tick().is_some() {
            ui.ctx().request_repaint();
        }

        if canvas.simulation.entities().is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No records to chart.",
                FontId::proportional(14.0),
                Color32::from_gray(200),
            );
            return;
        }

        if let Some(scale) = &canvas.time_scale {
            let axis_y = rect.top() + canvas.size.y - margin.bottom;
            let stroke = Stroke::new(1.0, AXIS_COLOR);
            painter.line_segment(
                [
                    Pos2::new(rect.left() + margin.left, axis_y),
                    Pos2::new(rect.right() - margin.right, axis_y),
                ],
                stroke,
            );

            let target_count = ((canvas.size.x / AXIS_TICK_SPACING) as usize).max(2);
            for tick in scale.ticks(target_count) {
                let x = rect.left() + tick.x;
                painter.line_segment(
                    [
                        Pos2::new(x, axis_y),
                        Pos2::new(x, axis_y + AXIS_TICK_LENGTH),
                    ],
                    stroke,
                );
                painter.text(
                    Pos2::new(x, axis_y + AXIS_TICK_LENGTH + 1.0),
                    Align2::CENTER_TOP,
                    tick.label,
                    FontId::proportional(11.0),
                    AXIS_COLOR,
                );
            }
        }

        if show_quadtree_overlay {
            canvas.simulation.quadtree_cells(&mut canvas.quadtree_cells);
            draw_quadtree_cells(&painter, rect, &canvas.quadtree_cells);
        }

        if canvas.labels.is_none() {
            canvas.labels = Some(fit_labels(&painter, canvas.simulation.entities()));
        }

        let entities = canvas.simulation.entities();
        let hovered = Self::hovered_index(ui, rect, entities);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        for (index, entity) in entities.iter().enumerate() {
            let center = chart_to_screen(rect, entity.position);
            let base_color = MonthPalette::color_for(entity.date);
            let is_hovered = hovered == Some(index);
            let is_pressed = pressed == Some(index);
            let is_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));

            let fill = if is_hovered {
                blend_color(base_color, Color32::WHITE, 0.25)
            } else if is_match {
                blend_color(base_color, Color32::from_rgb(103, 196, 255), 0.45)
            } else if search_active {
                dim_color(base_color, 0.38)
            } else {
                base_color
            };

            painter.circle_filled(center, entity.radius, fill);
            let stroke = if is_pressed {
                Stroke::new(2.2, Color32::from_rgb(245, 206, 93))
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            painter.circle_stroke(center, entity.radius, stroke);

            let text = canvas
                .labels
                .as_ref()
                .and_then(|labels| labels.get(index))
                .map(String::as_str)
                .unwrap_or_default();
            if !text.is_empty() {
                painter.text(
                    center + vec2(0.0, label::baseline_offset(entity.radius)),
                    Align2::CENTER_BOTTOM,
                    text,
                    FontId::proportional(label::font_size(entity.radius)),
                    label_color(fill),
                );
            }
        }

        if let Some(entity) = hovered.and_then(|index| entities.get(index)) {
            draw_tooltip(&painter, rect, entity);
        }

        self.handle_press(ui, hovered);
    }
}
