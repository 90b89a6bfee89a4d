#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Length of a canonical county identifier.
pub const FIPS_CODE_LENGTH: usize = 5;

/// Width of the state prefix inside a county identifier.
pub const STATE_CODE_WIDTH: usize = 2;

/// Width of the county suffix inside a county identifier.
pub const COUNTY_CODE_WIDTH: usize = 3;

/// Left-pads `value` with `'0'` up to `width` characters.
///
/// Values already at or beyond `width` are returned unchanged.
///
/// # Examples
///
/// ```
/// use fips_model::zero_pad;
///
/// assert_eq!(zero_pad("1001", 5), "01001");
/// assert_eq!(zero_pad("6", 2), "06");
/// assert_eq!(zero_pad("123456", 5), "123456");
/// ```
pub fn zero_pad(value: &str, width: usize) -> String {
    let length = value.chars().count();
    if length >= width {
        return value.to_string();
    }
    let mut padded = String::with_capacity(width);
    padded.extend(std::iter::repeat_n('0', width - length));
    padded.push_str(value);
    padded
}

/// A 5-character county identifier: 2-digit state prefix + 3-digit county suffix.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct FipsCode(String);

impl FipsCode {
    /// Pads a raw identifier to 5 characters and validates the result.
    pub fn normalize(raw: &str) -> Result<Self, ModelError> {
        let padded = zero_pad(raw, FIPS_CODE_LENGTH);
        let length = padded.chars().count();
        if length != FIPS_CODE_LENGTH {
            return Err(ModelError::InvalidFipsLength {
                value: raw.to_string(),
                length,
            });
        }
        Ok(Self(padded))
    }

    /// Builds an identifier from separate state and county codes.
    pub fn from_parts(state: &str, county: &str) -> Result<Self, ModelError> {
        let mut combined = zero_pad(state, STATE_CODE_WIDTH);
        combined.push_str(&zero_pad(county, COUNTY_CODE_WIDTH));
        Self::normalize(&combined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 2-character state prefix.
    pub fn state(&self) -> &str {
        &self.0[..self.state_boundary()]
    }

    /// The 3-character county suffix.
    pub fn county(&self) -> &str {
        &self.0[self.state_boundary()..]
    }

    fn state_boundary(&self) -> usize {
        self.0
            .char_indices()
            .nth(STATE_CODE_WIDTH)
            .map_or(self.0.len(), |(idx, _)| idx)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FipsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FipsCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for FipsCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl TryFrom<String> for FipsCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalize(&value)
    }
}

impl From<FipsCode> for String {
    fn from(code: FipsCode) -> Self {
        code.0
    }
}
