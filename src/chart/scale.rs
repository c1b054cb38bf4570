use chrono::{Datelike, Months, NaiveDate};
use eframe::egui::Color32;

/// Linear mapping from a date extent onto a horizontal pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    start: NaiveDate,
    end: NaiveDate,
    left: f32,
    right: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub x: f32,
    pub date: NaiveDate,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TickInterval {
    Days(u32),
    Months(u32),
    Years(u32),
}

const TICK_INTERVALS: [(TickInterval, f64); 11] = [
    (TickInterval::Days(1), 1.0),
    (TickInterval::Days(2), 2.0),
    (TickInterval::Days(7), 7.0),
    (TickInterval::Days(14), 14.0),
    (TickInterval::Months(1), 30.4),
    (TickInterval::Months(3), 91.3),
    (TickInterval::Months(6), 182.6),
    (TickInterval::Years(1), 365.25),
    (TickInterval::Years(2), 730.5),
    (TickInterval::Years(5), 1826.25),
    (TickInterval::Years(10), 3652.5),
];

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, width: f32) -> Self {
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        Self {
            start,
            end,
            left: 0.0,
            right: width,
        }
    }

    pub fn with_range(mut self, left: f32, right: f32) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>, width: f32) -> Option<Self> {
        let mut extent: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            extent = Some(match extent {
                Some((min, max)) => (min.min(date), max.max(date)),
                None => (date, date),
            });
        }
        extent.map(|(start, end)| Self::new(start, end, width))
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn project(&self, date: NaiveDate) -> f32 {
        let span = self.span_days();
        if span == 0 {
            return (self.left + self.right) * 0.5;
        }
        let offset = (date - self.start).num_days();
        let t = offset as f64 / span as f64;
        (self.left as f64 + t * (self.right - self.left) as f64) as f32
    }

    /// Ticks at calendar boundaries, picking the finest interval that keeps
    /// the count at or under `target_count`.
    pub fn ticks(&self, target_count: usize) -> Vec<AxisTick> {
        let span = self.span_days();
        if span == 0 {
            return vec![self.tick(self.start, TickInterval::Days(1))];
        }

        let target = target_count.max(1) as f64;
        let interval = TICK_INTERVALS
            .iter()
            .find(|(_, days)| span as f64 / days <= target)
            .map(|(interval, _)| *interval)
            .unwrap_or(TickInterval::Years(
                ((span as f64 / 365.25 / target).ceil() as u32).max(10),
            ));

        let mut ticks = Vec::new();
        let mut cursor = Some(Self::first_boundary(self.start, interval));
        while let Some(date) = cursor {
            if date > self.end {
                break;
            }
            ticks.push(self.tick(date, interval));
            cursor = Self::advance(date, interval);
        }
        ticks
    }

    fn tick(&self, date: NaiveDate, interval: TickInterval) -> AxisTick {
        let label = match interval {
            TickInterval::Days(_) => date.format("%b %d").to_string(),
            TickInterval::Months(_) if date.month() == 1 => date.format("%Y").to_string(),
            TickInterval::Months(_) => date.format("%B").to_string(),
            TickInterval::Years(_) => date.format("%Y").to_string(),
        };
        AxisTick {
            x: self.project(date),
            date,
            label,
        }
    }

    fn first_boundary(start: NaiveDate, interval: TickInterval) -> NaiveDate {
        match interval {
            TickInterval::Days(_) => start,
            TickInterval::Months(step) => {
                let mut date = start.with_day(1).unwrap_or(start);
                if date < start {
                    date = date.checked_add_months(Months::new(1)).unwrap_or(date);
                }
                while date.month0() % step != 0 {
                    let Some(next) = date.checked_add_months(Months::new(1)) else {
                        break;
                    };
                    date = next;
                }
                date
            }
            TickInterval::Years(step) => {
                let mut year = start.year();
                if start.ordinal() > 1 {
                    year += 1;
                }
                let step = step as i32;
                year += (step - year.rem_euclid(step)) % step;
                NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(start)
            }
        }
    }

    fn advance(date: NaiveDate, interval: TickInterval) -> Option<NaiveDate> {
        match interval {
            TickInterval::Days(step) => date.checked_add_days(chrono::Days::new(step as u64)),
            TickInterval::Months(step) => date.checked_add_months(Months::new(step)),
            TickInterval::Years(step) => date.checked_add_months(Months::new(step * 12)),
        }
    }
}

/// One fixed colour per month of the year.
pub struct MonthPalette;

impl MonthPalette {
    const COLORS: [Color32; 12] = [
        Color32::from_rgb(0x2c, 0xa2, 0x5f),
        Color32::from_rgb(0x88, 0x56, 0xa7),
        Color32::from_rgb(0x43, 0xa2, 0xca),
        Color32::from_rgb(0xe3, 0x4a, 0x33),
        Color32::from_rgb(0xa6, 0xbd, 0xdb),
        Color32::from_rgb(0xec, 0xe7, 0xf2),
        Color32::from_rgb(0xdd, 0x1c, 0x77),
        Color32::from_rgb(0xf7, 0xfc, 0xb9),
        Color32::from_rgb(0x2c, 0x7f, 0xb8),
        Color32::from_rgb(0xfe, 0xc4, 0x4f),
        Color32::from_rgb(0x75, 0x6b, 0xb1),
        Color32::from_rgb(0xbd, 0xbd, 0xbd),
    ];

    /// The palette starts at February; January takes the last slot.
    pub fn color_for(date: NaiveDate) -> Color32 {
        let index = (date.month0() as usize + 11) % 12;
        Self::COLORS[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn projects_extent_onto_width() {
        let scale = TimeScale::new(date(2014, 3, 1), date(2014, 3, 2), 400.0);
        assert_eq!(scale.project(date(2014, 3, 1)), 0.0);
        assert_eq!(scale.project(date(2014, 3, 2)), 400.0);
    }

    #[test]
    fn custom_range_offsets_projection() {
        let scale =
            TimeScale::new(date(2014, 1, 1), date(2014, 1, 11), 0.0).with_range(20.0, 120.0);
        assert_eq!(scale.project(date(2014, 1, 1)), 20.0);
        assert_eq!(scale.project(date(2014, 1, 6)), 70.0);
        assert_eq!(scale.project(date(2014, 1, 11)), 120.0);
    }

    #[test]
    fn zero_length_extent_maps_to_centre() {
        let scale = TimeScale::from_dates([date(2014, 5, 5), date(2014, 5, 5)], 300.0)
            .expect("non-empty extent");
        assert_eq!(scale.project(date(2014, 5, 5)), 150.0);
        assert_eq!(scale.ticks(8).len(), 1);
    }

    #[test]
    fn from_dates_is_order_independent() {
        let forward = TimeScale::from_dates([date(2014, 1, 1), date(2014, 12, 1)], 100.0);
        let reverse = TimeScale::from_dates([date(2014, 12, 1), date(2014, 1, 1)], 100.0);
        assert_eq!(forward, reverse);
        assert!(TimeScale::from_dates([], 100.0).is_none());
    }

    #[test]
    fn year_span_uses_month_ticks() {
        let scale = TimeScale::new(date(2014, 1, 6), date(2014, 12, 20), 1200.0);
        let ticks = scale.ticks(12);

        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0].date, date(2014, 2, 1));
        assert_eq!(ticks[0].label, "February");
        assert!(ticks.windows(2).all(|pair| pair[0].x < pair[1].x));
        assert!(ticks.iter().all(|tick| (0.0..=1200.0).contains(&tick.x)));
    }

    #[test]
    fn january_tick_shows_year() {
        let scale = TimeScale::new(date(2013, 11, 1), date(2014, 3, 1), 500.0);
        let ticks = scale.ticks(6);
        let january = ticks
            .iter()
            .find(|tick| tick.date == date(2014, 1, 1))
            .expect("january tick present");
        assert_eq!(january.label, "2014");
    }

    #[test]
    fn month_colour_is_pure_function_of_month() {
        assert_eq!(
            MonthPalette::color_for(date(2014, 3, 1)),
            MonthPalette::color_for(date(2019, 3, 28))
        );
        assert_eq!(
            MonthPalette::color_for(date(2014, 2, 1)),
            Color32::from_rgb(0x2c, 0xa2, 0x5f)
        );
        assert_eq!(
            MonthPalette::color_for(date(2015, 1, 9)),
            Color32::from_rgb(0xbd, 0xbd, 0xbd)
        );
        assert_ne!(
            MonthPalette::color_for(date(2014, 3, 1)),
            MonthPalette::color_for(date(2014, 4, 1))
        );
    }
}
