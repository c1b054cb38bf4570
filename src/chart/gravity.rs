use super::entity::Entity;

/// Pull toward the entity's time-axis position and the vertical centre.
#[derive(Clone, Copy, Debug)]
pub struct Gravity {
    rate: f32,
    center_y: f32,
}

impl Gravity {
    pub fn new(alpha: f32, damping: f32, center_y: f32) -> Self {
        let rate = (alpha * damping).clamp(0.0, 1.0);
        Self { rate, center_y }
    }

    #[cfg(test)]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn apply(&self, entity: &mut Entity) {
        entity.position.x += (entity.target_x - entity.position.x) * self.rate;
        entity.position.y += (self.center_y - entity.position.y) * self.rate;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use eframe::egui::vec2;

    use super::*;
    use crate::data::Record;

    fn entity() -> Entity {
        let record = Record::new(
            NaiveDate::from_ymd_opt(2014, 3, 1).expect("valid date"),
            5.0,
            "engine",
        );
        let mut entity = Entity::from_record(&record, 0, 1.0, 200.0, 150.0, 0.0);
        entity.position = vec2(100.0, 50.0);
        entity
    }

    #[test]
    fn pulls_proportionally_to_displacement() {
        let mut subject = entity();
        Gravity::new(1.0, 0.1, 150.0).apply(&mut subject);
        assert!((subject.position.x - 110.0).abs() < 1e-4);
        assert!((subject.position.y - 60.0).abs() < 1e-4);
    }

    #[test]
    fn vanishes_with_alpha() {
        let mut subject = entity();
        Gravity::new(0.0, 0.1, 150.0).apply(&mut subject);
        assert_eq!(subject.position, vec2(100.0, 50.0));
    }

    #[test]
    fn rate_never_overshoots_target() {
        assert_eq!(Gravity::new(50.0, 0.1, 0.0).rate(), 1.0);
        assert_eq!(Gravity::new(-1.0, 0.1, 0.0).rate(), 0.0);
    }
}
