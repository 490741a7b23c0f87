//! The validated fitness entry.
//!
//! A `FitnessEntry` can only be obtained through [`FitnessEntry::new`] (or
//! something that calls it), so every value in circulation satisfies the
//! field constraints. Edits produce a new entry rather than mutating one.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Header line written at the top of every data file
pub const CSV_HEADER: &str = "Date,HeartRate,Steps,Calories,Sleep,Weight";

/// Number of columns in a data line
pub const CSV_COLUMNS: usize = 6;

/// Upper bound for sleep hours
const MAX_SLEEP_HOURS: f64 = 24.0;

/// Identifies an entry field, used to report which constraint failed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    HeartRate,
    Steps,
    Calories,
    SleepHours,
    WeightKg,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Date => "date",
            Field::HeartRate => "heart rate",
            Field::Steps => "steps",
            Field::Calories => "calories",
            Field::SleepHours => "sleep",
            Field::WeightKg => "weight",
        };
        f.write_str(name)
    }
}

/// One day's fitness measurements
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FitnessEntry {
    date: String,
    heart_rate: i32,
    steps: i32,
    calories: i32,
    sleep_hours: f64,
    weight_kg: f64,
}

impl FitnessEntry {
    /// Validate the fields and build an entry
    ///
    /// Constraints are checked in field order and the first violation is
    /// returned as [`Error::Validation`]. The date is stored trimmed.
    pub fn new(
        date: &str,
        heart_rate: i32,
        steps: i32,
        calories: i32,
        sleep_hours: f64,
        weight_kg: f64,
    ) -> Result<Self> {
        let date = date.trim();
        if date.is_empty() {
            return Err(invalid(Field::Date, "Date cannot be null or empty"));
        }
        if heart_rate <= 0 {
            return Err(invalid(Field::HeartRate, "Heart rate must be positive"));
        }
        if steps < 0 {
            return Err(invalid(Field::Steps, "Steps cannot be negative"));
        }
        if calories < 0 {
            return Err(invalid(Field::Calories, "Calories cannot be negative"));
        }
        // Written so that NaN fails as well
        if !(0.0..=MAX_SLEEP_HOURS).contains(&sleep_hours) {
            return Err(invalid(
                Field::SleepHours,
                "Sleep must be between 0 and 24 hours",
            ));
        }
        if weight_kg.is_nan() || weight_kg <= 0.0 {
            return Err(invalid(Field::WeightKg, "Weight must be positive"));
        }

        Ok(Self {
            date: date.to_string(),
            heart_rate,
            steps,
            calories,
            sleep_hours,
            weight_kg,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn heart_rate(&self) -> i32 {
        self.heart_rate
    }

    pub fn steps(&self) -> i32 {
        self.steps
    }

    pub fn calories(&self) -> i32 {
        self.calories
    }

    pub fn sleep_hours(&self) -> f64 {
        self.sleep_hours
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// The fixed header line for data files
    pub fn csv_header() -> &'static str {
        CSV_HEADER
    }

    /// Serialize as a data line
    ///
    /// Floats are written with one decimal place and always use `.` as the
    /// decimal separator, which is what the loader expects.
    pub fn to_csv_line(&self) -> String {
        self.csv_fields().join(",")
    }

    /// The six column values in file order
    pub fn csv_fields(&self) -> [String; CSV_COLUMNS] {
        [
            self.date.clone(),
            self.heart_rate.to_string(),
            self.steps.to_string(),
            self.calories.to_string(),
            one_decimal(self.sleep_hours),
            one_decimal(self.weight_kg),
        ]
    }

    /// Build an entry from the six column values of a data line
    ///
    /// Integer columns must parse as integers; the two decimal columns
    /// accept either `.` or `,` as the separator. The result still goes
    /// through [`FitnessEntry::new`].
    pub fn from_csv_fields<'a, I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let parts: Vec<&str> = fields.into_iter().collect();
        if parts.len() != CSV_COLUMNS {
            return Err(Error::Parse(format!(
                "Invalid CSV format - expected {} columns, got {}",
                CSV_COLUMNS,
                parts.len()
            )));
        }

        Self::new(
            parts[0],
            parse_int(parts[1], Field::HeartRate)?,
            parse_int(parts[2], Field::Steps)?,
            parse_int(parts[3], Field::Calories)?,
            parse_decimal(parts[4]).map_err(|_| number_error(Field::SleepHours, parts[4]))?,
            parse_decimal(parts[5]).map_err(|_| number_error(Field::WeightKg, parts[5]))?,
        )
    }

    /// Build a new entry from this one with some fields replaced
    pub fn apply(&self, patch: &EntryPatch) -> Result<Self> {
        Self::new(
            patch.date.as_deref().unwrap_or(self.date.as_str()),
            patch.heart_rate.unwrap_or(self.heart_rate),
            patch.steps.unwrap_or(self.steps),
            patch.calories.unwrap_or(self.calories),
            patch.sleep_hours.unwrap_or(self.sleep_hours),
            patch.weight_kg.unwrap_or(self.weight_kg),
        )
    }
}

impl fmt::Display for FitnessEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | HR: {} | Steps: {} | Calories: {} | Sleep: {}h | Weight: {}kg",
            self.date,
            self.heart_rate,
            self.steps,
            self.calories,
            one_decimal(self.sleep_hours),
            one_decimal(self.weight_kg)
        )
    }
}

/// Parses one data line as written by the store, honouring CSV quoting
///
/// The line is read on its own, so a stray quote cannot reach past it. A line
/// with an odd number of `"` characters is half of a quoted field that was
/// split across lines and is rejected.
impl FromStr for FitnessEntry {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        if line.trim().is_empty() {
            return Err(Error::Parse("Line cannot be empty".into()));
        }
        if line.matches('"').count() % 2 != 0 {
            return Err(Error::Parse("Unbalanced quote".into()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());

        let mut record = csv::StringRecord::new();
        if !reader.read_record(&mut record)? {
            return Err(Error::Parse("Line cannot be empty".into()));
        }

        Self::from_csv_fields(record.iter())
    }
}

/// Replacement values for an update; `None` keeps the current value
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryPatch {
    pub date: Option<String>,
    pub heart_rate: Option<i32>,
    pub steps: Option<i32>,
    pub calories: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub weight_kg: Option<f64>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parse a decimal number, accepting `,` as the decimal separator
pub fn parse_decimal(input: &str) -> Result<f64> {
    let normalized = input.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .map_err(|_| Error::Parse(format!("Invalid number format: '{}'", input.trim())))
}

fn parse_int(input: &str, field: Field) -> Result<i32> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|_| number_error(field, input))
}

fn number_error(field: Field, input: &str) -> Error {
    Error::Parse(format!("Invalid number format for {}: '{}'", field, input.trim()))
}

/// One decimal place, ties rounded away from zero
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

fn invalid(field: Field, message: &str) -> Error {
    Error::Validation {
        field,
        message: message.into(),
    }
}
