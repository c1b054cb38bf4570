use eframe::egui::{self, RichText, Ui};

use bubble_timeline::chart::MonthPalette;
use bubble_timeline::util::{format_frequency, format_month};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let pressed = self.pressed.and_then(|index| {
            self.canvas
                .as_ref()
                .and_then(|canvas| canvas.simulation.entities().get(index))
        });

        match pressed {
            Some(entity) => {
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, MonthPalette::color_for(entity.date));
                    ui.label(RichText::new(entity.label.as_str()).strong());
                });
                ui.label(format!("Date: {}", format_month(entity.date)));
                ui.label(format!("Frequency: {}", format_frequency(entity.frequency)));
                ui.label(format!("Radius: {:.1}px", entity.radius));
                ui.label(format!(
                    "Position: ({:.1}, {:.1})",
                    entity.position.x, entity.position.y
                ));
                ui.label(format!(
                    "Drift from date: {:+.1}px",
                    entity.position.x - entity.target_x
                ));
            }
            None => {
                ui.label("Press a bubble to request its subjects.");
            }
        }

        ui.separator();
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("Requested subjects ({})", self.subjects.len())).strong(),
            );
            if ui
                .add_enabled(!self.subjects.is_empty(), egui::Button::new("Clear"))
                .clicked()
            {
                self.subjects.clear();
            }
        });

        if self.subjects.is_empty() {
            ui.small("Nothing requested yet.");
        }
        for word in self.subjects.requests().rev() {
            ui.label(word);
        }

        if let Some(canvas) = &self.canvas
            && let Some(scale) = &canvas.time_scale
        {
            ui.separator();
            let (start, end) = scale.domain();
            ui.label(RichText::new("Time axis").strong());
            ui.label(format!("{} to {}", format_month(start), format_month(end)));
        }
    }
}
