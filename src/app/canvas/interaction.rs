use eframe::egui::{self, Color32, FontId, Painter, Pos2, Rect, Stroke, Ui, vec2};

use bubble_timeline::chart::Entity;
use bubble_timeline::util::{format_frequency, format_month};

use super::super::ViewModel;
use super::super::render_utils::chart_to_screen;
use super::super::subjects::SubjectHandler;

const TOOLTIP_FONT: f32 = 12.0;
const TOOLTIP_PADDING: f32 = 6.0;

impl ViewModel {
    /// Bubble under the pointer, nearest centre first.
    pub(super) fn hovered_index(ui: &Ui, rect: Rect, entities: &[Entity]) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        entities
            .iter()
            .enumerate()
            .filter_map(|(index, entity)| {
                let distance = chart_to_screen(rect, entity.position).distance(pointer);
                (distance <= entity.radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// A primary press on a bubble selects it and requests its subjects.
    pub(super) fn handle_press(&mut self, ui: &Ui, hovered: Option<usize>) {
        let pressed = ui.input(|input| input.pointer.primary_pressed());
        if !pressed {
            return;
        }
        let Some(index) = hovered else {
            return;
        };

        let Some(word) = self
            .canvas
            .as_ref()
            .and_then(|canvas| canvas.simulation.entities().get(index))
            .map(|entity| entity.label.clone())
        else {
            return;
        };

        self.pressed = Some(index);
        self.subjects.request_subjects(&word);
    }
}

/// Hover box anchored at the bubble's right edge.
pub(super) fn draw_tooltip(painter: &Painter, rect: Rect, entity: &Entity) {
    let anchor = chart_to_screen(rect, entity.position) + vec2(entity.radius, 0.0);
    let text = format!(
        "{}\ndate: {}\nfreq: {}",
        entity.label,
        format_month(entity.date),
        format_frequency(entity.frequency)
    );

    let galley = painter.layout_no_wrap(
        text,
        FontId::proportional(TOOLTIP_FONT),
        Color32::from_gray(240),
    );
    let size = galley.size() + vec2(TOOLTIP_PADDING, TOOLTIP_PADDING) * 2.0;

    // Flip inward when the box would leave the canvas.
    let mut min = anchor;
    if min.x + size.x > rect.right() {
        min.x = (anchor.x - entity.radius * 2.0 - size.x).max(rect.left());
    }
    if min.y + size.y > rect.bottom() {
        min.y = (rect.bottom() - size.y).max(rect.top());
    }
    let frame = Rect::from_min_size(min, size);

    painter.rect(
        frame,
        4.0,
        Color32::from_rgba_unmultiplied(24, 28, 36, 232),
        Stroke::new(1.0, Color32::from_gray(90)),
        egui::StrokeKind::Inside,
    );
    painter.galley(
        Pos2::new(
            frame.min.x + TOOLTIP_PADDING,
            frame.min.y + TOOLTIP_PADDING,
        ),
        galley,
        Color32::from_gray(240),
    );
}
