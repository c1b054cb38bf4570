mod app;

use std::path::PathBuf;

use clap::Parser;

use bubble_timeline::chart::ChartConfig;
use bubble_timeline::data::Source;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON records to chart; the built-in demo set is used when omitted.
    input: Option<PathBuf>,

    /// Minimum gap between neighbouring bubble edges, in pixels.
    #[arg(long, default_value_t = 0.0)]
    padding: f32,

    /// Bubble radius per unit of frequency.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Let bubbles drift past the right edge of the canvas.
    #[arg(long)]
    keep_right_edge_open: bool,

    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .init();

    let config = ChartConfig::default()
        .with_padding(args.padding)
        .with_scale(args.scale)
        .with_right_edge_clamp(!args.keep_right_edge_open);
    let source = args.input.map_or(Source::Demo, Source::File);
    tracing::info!(source = %source.describe(), "starting viewer");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "bubble-timeline",
        options,
        Box::new(move |cc| Ok(Box::new(app::BubbleChartApp::new(cc, source, config)))),
    )
}
