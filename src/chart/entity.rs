use chrono::NaiveDate;
use eframe::egui::{Vec2, vec2};

use crate::data::Record;
use crate::util::stable_pair;

use super::error::ChartError;

/// Radius used when `frequency × scale` is not a positive number.
pub const MIN_RADIUS: f32 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub position: Vec2,
    pub(super) previous: Vec2,
    pub radius: f32,
    pub target_x: f32,
    pub date: NaiveDate,
    pub label: String,
    pub frequency: f64,
}

impl Entity {
    pub(super) fn from_record(
        record: &Record,
        index: usize,
        scale: f32,
        target_x: f32,
        center_y: f32,
        spread_y: f32,
    ) -> Self {
        let radius = checked_radius(record, scale);

        // Records on the same date would otherwise start stacked on one point.
        let (_, jitter) = stable_pair(&format!("{index}:{}", record.label));
        let position = vec2(target_x, center_y + jitter * spread_y);

        Self {
            position,
            previous: position,
            radius,
            target_x,
            date: record.date,
            label: record.label.clone(),
            frequency: record.frequency,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous
    }

    pub fn distance_to(&self, other: &Entity) -> f32 {
        (self.position - other.position).length()
    }
}

fn checked_radius(record: &Record, scale: f32) -> f32 {
    let radius = (record.frequency * scale as f64) as f32;
    if radius.is_finite() && radius > 0.0 {
        return radius;
    }

    let error = ChartError::InvalidRadius {
        label: record.label.clone(),
        radius,
    };
    tracing::warn!(%error);
    MIN_RADIUS
}
