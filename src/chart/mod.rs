//! Frequency bubbles on a time axis, separated by a collision-driven force
//! layout. Nothing in here draws; the viewer reads [`Entity`] positions.

mod collide;
mod config;
mod entity;
mod error;
mod gravity;
pub mod label;
mod quadtree;
mod scale;
mod simulation;

pub use collide::Boundary;
pub use config::{ChartConfig, Margin, SimulationConfig};
pub use entity::{Entity, MIN_RADIUS};
pub use error::{ChartError, Result};
pub use quadtree::QuadtreeCell;
pub use scale::{AxisTick, MonthPalette, TimeScale};
pub use simulation::{Simulation, SimulationState, TickReport};

use crate::data::Record;

/// Builds an idle simulation for a `width × height` drawable area.
///
/// Targets are projected onto `[margin.left, width − margin.right]` and every
/// entity starts on its target column near the vertical centre.
pub fn layout(
    records: &[Record],
    width: f32,
    height: f32,
    config: &ChartConfig,
) -> Result<Simulation> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(ChartError::InvalidDimension { width, height });
    }

    let margin = config.margin;
    let boundary = Boundary {
        width,
        height,
        top_margin: margin.top,
        bottom_margin: margin.bottom,
        clamp_right_edge: config.clamp_right_edge,
    };

    let entities = match time_scale(records, width, &margin) {
        Some(scale) => {
            let center_y = boundary.center_y();
            let spread_y = ((height - margin.top - margin.bottom) * 0.25).max(0.0);
            records
                .iter()
                .enumerate()
                .map(|(index, record)| {
                    Entity::from_record(
                        record,
                        index,
                        config.scale,
                        scale.project(record.date),
                        center_y,
                        spread_y,
                    )
                })
                .collect()
        }
        None => Vec::new(),
    };

    tracing::debug!(
        entities = entities.len(),
        width,
        height,
        padding = config.padding,
        scale = config.scale,
        "chart laid out"
    );

    Ok(Simulation::new(
        entities,
        boundary,
        config.padding,
        config.simulation,
    ))
}

/// The x scale `layout` uses, for drawing the axis under the bubbles.
pub fn time_scale(records: &[Record], width: f32, margin: &Margin) -> Option<TimeScale> {
    TimeScale::from_dates(records.iter().map(|record| record.date), width)
        .map(|scale| scale.with_range(margin.left, width - margin.right))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn rejects_unlaid_out_container() {
        let records = vec![Record::new(
            NaiveDate::from_ymd_opt(2014, 3, 1).expect("valid date"),
            1.0,
            "engine",
        )];

        for (width, height) in [(0.0, 300.0), (400.0, 0.0), (f32::NAN, 10.0), (-5.0, 10.0)] {
            let error = layout(&records, width, height, &ChartConfig::default())
                .err()
                .expect("invalid size");
            assert!(matches!(error, ChartError::InvalidDimension { .. }));
        }
    }

    #[test]
    fn targets_follow_time_axis() {
        let records = vec![
            Record::new(NaiveDate::from_ymd_opt(2014, 3, 1).expect("date"), 1.0, "a"),
            Record::new(NaiveDate::from_ymd_opt(2014, 3, 11).expect("date"), 1.0, "b"),
            Record::new(NaiveDate::from_ymd_opt(2014, 3, 6).expect("date"), 1.0, "c"),
        ];
        let simulation = layout(&records, 400.0, 300.0, &ChartConfig::default()).expect("layout");
        let targets = simulation
            .entities()
            .iter()
            .map(|entity| entity.target_x)
            .collect::<Vec<_>>();
        assert_eq!(targets, vec![0.0, 400.0, 200.0]);
        assert_eq!(simulation.state(), SimulationState::Idle);
    }
}
