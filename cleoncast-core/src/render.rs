//! Pure mapping from screen state to display text.

use std::fmt;

use crate::{ForecastSnapshot, WeatherSnapshot, state::ViewState};

pub mod date;
pub mod icon;

pub use date::{format_forecast_date, ordinal_suffix};
pub use icon::Icon;

/// Round to the nearest whole degree, halves away from zero.
pub fn round_temperature(celsius: f64) -> i64 {
    celsius.round() as i64
}

/// Display model of a snapshot.
pub trait Render {
    type View: fmt::Display;

    fn render(&self) -> Self::View;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub heading: String,
    pub temperature_c: i64,
    pub condition: String,
}

impl CurrentView {
    pub fn summary(&self) -> String {
        format!("{}°C, {}", self.temperature_c, self.condition)
    }
}

impl fmt::Display for CurrentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        write!(f, "{}", self.summary())
    }
}

impl Render for WeatherSnapshot {
    type View = CurrentView;

    fn render(&self) -> CurrentView {
        CurrentView {
            heading: format!("Weather in {}, {}", self.location.name, self.location.country),
            temperature_c: round_temperature(self.temperature_c),
            condition: self.condition.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: String,
    pub icon: Option<Icon>,
    pub condition: String,
    pub high_c: f64,
    pub low_c: f64,
}

impl DayView {
    pub fn range(&self) -> String {
        format!("High: {}°C / Low: {}°C", self.high_c, self.low_c)
    }
}

impl fmt::Display for DayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        match self.icon {
            Some(icon) => writeln!(f, "  {} {}", icon.glyph(), self.condition)?,
            None => writeln!(f, "  {}", self.condition)?,
        }
        write!(f, "  {}", self.range())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub heading: String,
    pub days: Vec<DayView>,
}

impl fmt::Display for ForecastView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.heading)?;
        for day in &self.days {
            write!(f, "\n\n{day}")?;
        }
        Ok(())
    }
}

impl Render for ForecastSnapshot {
    type View = ForecastView;

    fn render(&self) -> ForecastView {
        let days = self
            .days
            .iter()
            .map(|day| DayView {
                date: format_forecast_date(&day.date),
                icon: Icon::for_condition(&day.condition),
                condition: day.condition.clone(),
                high_c: day.max_temp_c,
                low_c: day.min_temp_c,
            })
            .collect();

        ForecastView {
            heading: format!("Forecast for {}, {}", self.location.name, self.location.country),
            days,
        }
    }
}

/// Everything a screen shows below its form.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView<V> {
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<V>,
}

impl<T: Render> From<&ViewState<T>> for ScreenView<T::View> {
    fn from(view: &ViewState<T>) -> Self {
        ScreenView {
            loading: view.is_loading(),
            error: view.error().map(|e| format!("An error occurred: {e}")),
            result: view.snapshot().map(Render::render),
        }
    }
}

impl<V: fmt::Display> fmt::Display for ScreenView<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections = Vec::new();
        if self.loading {
            sections.push("Loading...".to_string());
        }
        if let Some(error) = &self.error {
            sections.push(error.clone());
        }
        if let Some(result) = &self.result {
            sections.push(result.to_string());
        }
        f.write_str(&sections.join("\n\n"))
    }
}
