use eframe::egui::{self, Ui};

use super::super::ViewModel;

const PADDING_RANGE: std::ops::RangeInclusive<f32> = 0.0..=24.0;
const SCALE_RANGE: std::ops::RangeInclusive<f32> = 0.1..=10.0;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Controls");
        ui.add_space(6.0);

        ui.label("Search labels");
        ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("fuzzy match, e.g. eng")
                .desired_width(f32::INFINITY),
        );

        ui.separator();

        let mut changed = false;
        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.padding, PADDING_RANGE)
                    .step_by(0.5)
                    .text("Padding"),
            )
            .on_hover_text("Minimum gap kept between neighbouring bubble edges.")
            .changed();

        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.scale, SCALE_RANGE)
                    .logarithmic(true)
                    .text("Scale"),
            )
            .on_hover_text("Bubble radius per unit of frequency.")
            .changed();

        changed |= ui
            .checkbox(&mut self.config.clamp_right_edge, "Keep bubbles inside right edge")
            .on_hover_text("When off, bubbles may drift past the right edge of the canvas.")
            .changed();

        if changed {
            self.layout_dirty = true;
        }

        ui.separator();

        ui.checkbox(&mut self.live_simulation, "Live simulation")
            .on_hover_text("Advance the layout one tick per frame.");

        ui.checkbox(&mut self.show_quadtree_overlay, "Show quadtree overlay")
            .on_hover_text("Draw the collision quadtree partitions over the chart.");

        ui.horizontal(|ui| {
            let has_canvas = self.canvas.is_some();
            if ui
                .add_enabled(has_canvas, egui::Button::new("Restart"))
                .on_hover_text("Reheat the simulation from the current positions.")
                .clicked()
                && let Some(canvas) = self.canvas.as_mut()
            {
                canvas.simulation.restart();
            }

            let running = self
                .canvas
                .as_ref()
                .is_some_and(|canvas| canvas.simulation.is_running());
            if ui
                .add_enabled(running, egui::Button::new("Stop"))
                .clicked()
                && let Some(canvas) = self.canvas.as_mut()
            {
                canvas.simulation.stop();
            }
        });

        ui.collapsing("Simulation tuning", |ui| {
            let simulation = &mut self.config.simulation;
            let mut tuned = false;
            tuned |= ui
                .add(egui::Slider::new(&mut simulation.friction, 0.0..=0.95).text("Friction"))
                .on_hover_text("Share of last tick's movement carried into the next tick.")
                .changed();
            tuned |= ui
                .add(
                    egui::Slider::new(&mut simulation.gravity_damping, 0.01..=0.5)
                        .text("Gravity"),
                )
                .on_hover_text("Pull toward each bubble's date, scaled by alpha.")
                .changed();
            tuned |= ui
                .add(
                    egui::Slider::new(&mut simulation.alpha_decay, 0.9..=0.999)
                        .text("Alpha decay"),
                )
                .on_hover_text("Per-tick cooling factor; closer to 1 runs longer.")
                .changed();
            if tuned {
                self.layout_dirty = true;
            }
            ui.small(format!(
                "Settles within {} ticks.",
                self.config.simulation.max_ticks()
            ));
        });
    }
}
