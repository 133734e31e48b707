/// Errors that can occur when creating validated numeric types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TypeError {
    /// The input was NaN or infinite
    #[error("value must be a finite number")]
    NotFinite,
    /// The input was zero or negative
    #[error("value must be greater than zero (got {0})")]
    NotPositive(f64),
    /// The input text could not be read as a number
    #[error("'{0}' is not a number")]
    NotNumeric(String),
}

/// A real number that is guaranteed to be finite and strictly positive.
///
/// Ages, glucose levels and BMI values are all carried as `PositiveReal` once they have passed
/// input validation, so downstream code never has to re-check them.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PositiveReal(f64);

impl PositiveReal {
    /// Creates a new `PositiveReal` from the given value.
    ///
    /// # Arguments
    ///
    /// * `value` - The candidate value
    ///
    /// # Returns
    ///
    /// Returns `Ok(PositiveReal)` if `value` is finite and greater than zero,
    /// otherwise the matching `TypeError`.
    pub fn new(value: f64) -> Result<Self, TypeError> {
        if !value.is_finite() {
            return Err(TypeError::NotFinite);
        }
        if value <= 0.0 {
            return Err(TypeError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Parses a `PositiveReal` from text, ignoring leading and trailing whitespace.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = input.as_ref().trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| TypeError::NotNumeric(trimmed.to_owned()))?;
        Self::new(value)
    }

    /// Returns the inner value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for PositiveReal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PositiveReal> for f64 {
    fn from(value: PositiveReal) -> Self {
        value.0
    }
}

impl serde::Serialize for PositiveReal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PositiveReal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        PositiveReal::new(value).map_err(serde::de::Error::custom)
    }
}
