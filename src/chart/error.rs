use eframe::egui::Vec2;

/// Degenerate inputs the chart recovers from. Only `InvalidDimension` is ever
/// returned to a caller; the other variants are logged and corrected in place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("drawable area {width}x{height} is not laid out yet")]
    InvalidDimension { width: f32, height: f32 },
    #[error("record `{label}` produced radius {radius}; clamping to the minimum")]
    InvalidRadius { label: String, radius: f32 },
    #[error("entities {subject} and {other} share a centre at {at:?}")]
    DegenerateGeometry {
        subject: usize,
        other: usize,
        at: Vec2,
    },
}

pub type Result<T> = std::result::Result<T, ChartError>;
