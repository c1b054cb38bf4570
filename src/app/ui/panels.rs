use eframe::egui::{self, Align, Context, Layout};

use bubble_timeline::chart::ChartConfig;
use bubble_timeline::data::{Record, Source};

use super::super::ViewModel;
use super::super::subjects::SubjectLog;

impl ViewModel {
    pub(in crate::app) fn new(records: Vec<Record>, config: ChartConfig) -> Self {
        Self {
            records,
            config,
            live_simulation: true,
            show_quadtree_overlay: false,
            search: String::new(),
            layout_dirty: true,
            layout_revision: 0,
            canvas: None,
            search_match_cache: None,
            pressed: None,
            subjects: SubjectLog::default(),
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source: &Source,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("bubble-timeline");
                    ui.separator();
                    ui.label(format!("source: {}", source.describe()));
                    ui.label(format!("records: {}", self.records.len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload records"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Rebuild layout").clicked() {
                        self.layout_dirty = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(status) = self.simulation_status_text() {
                            ui.label(status);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.draw_details(ui));
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_chart(ui));
    }

    fn simulation_status_text(&self) -> Option<String> {
        self.canvas.as_ref().map(|canvas| {
            let simulation = &canvas.simulation;
            format!(
                "{} | alpha {:.3} | ticks {} | overlap {:.2}px",
                simulation.state().label(),
                simulation.alpha(),
                simulation.ticks(),
                simulation.max_overlap().max(0.0)
            )
        })
    }
}
