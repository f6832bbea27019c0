use chrono::{Days, NaiveDate, NaiveDateTime};
use ski_utils::dates::start_of_day;

/// The caller's reporting window.
///
/// History covers `[today - days, today]`; forecasts cover valid times in
/// `[today 00:00, (today + days) 00:00]`. `today` is always supplied by the
/// caller so repeated runs over the same data give identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherWindow {
    pub today: NaiveDate,
    pub days: u32,
}

impl WeatherWindow {
    pub const DEFAULT_DAYS: u32 = 7;

    pub fn new(today: NaiveDate, days: u32) -> Self {
        Self { today, days }
    }

    /// A window of [`Self::DEFAULT_DAYS`] ending at `today`.
    pub fn ending(today: NaiveDate) -> Self {
        Self::new(today, Self::DEFAULT_DAYS)
    }

    pub fn history_start(&self) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(self.days.into()))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn history_end(&self) -> NaiveDate {
        self.today
    }

    pub fn forecast_start(&self) -> NaiveDateTime {
        start_of_day(self.today)
    }

    pub fn forecast_end(&self) -> NaiveDateTime {
        let last = self
            .today
            .checked_add_days(Days::new(self.days.into()))
            .unwrap_or(NaiveDate::MAX);
        start_of_day(last)
    }
}
