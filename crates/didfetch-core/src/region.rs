//! Prefecture region codes ("01" Hokkaido .. "47" Okinawa).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of first-level administrative regions.
pub const REGION_COUNT: u8 = 47;

const PREFECTURES: [&str; REGION_COUNT as usize] = [
    "Hokkaido", "Aomori", "Iwate", "Miyagi", "Akita", "Yamagata", "Fukushima",
    "Ibaraki", "Tochigi", "Gunma", "Saitama", "Chiba", "Tokyo", "Kanagawa",
    "Niigata", "Toyama", "Ishikawa", "Fukui", "Yamanashi", "Nagano", "Gifu",
    "Shizuoka", "Aichi", "Mie", "Shiga", "Kyoto", "Osaka", "Hyogo", "Nara",
    "Wakayama", "Tottori", "Shimane", "Okayama", "Hiroshima", "Yamaguchi",
    "Tokushima", "Kagawa", "Ehime", "Kochi", "Fukuoka", "Saga", "Nagasaki",
    "Kumamoto", "Oita", "Miyazaki", "Kagoshima", "Okinawa",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionCodeError {
    #[error("region code is not a number: {0:?}")]
    NotANumber(String),
    #[error("region code {0} out of range (1..=47)")]
    OutOfRange(u32),
    #[error("no region codes given")]
    Empty,
}

/// One of the 47 prefectures. Always displays zero-padded to two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionCode(u8);

impl RegionCode {
    pub fn new(n: u8) -> Result<Self, RegionCodeError> {
        if (1..=REGION_COUNT).contains(&n) {
            Ok(RegionCode(n))
        } else {
            Err(RegionCodeError::OutOfRange(n.into()))
        }
    }

    /// All codes in ascending order.
    pub fn all() -> Vec<RegionCode> {
        (1..=REGION_COUNT).map(RegionCode).collect()
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Romanized prefecture name, for display only.
    pub fn prefecture(self) -> &'static str {
        PREFECTURES[usize::from(self.0) - 1]
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Accepts "5" as well as "05".
impl FromStr for RegionCode {
    type Err = RegionCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RegionCodeError::NotANumber(s.to_string()));
        }
        let n: u32 = s
            .parse()
            .map_err(|_| RegionCodeError::NotANumber(s.to_string()))?;
        let n = u8::try_from(n).map_err(|_| RegionCodeError::OutOfRange(n))?;
        RegionCode::new(n)
    }
}

/// Comma-separated subset of region codes, sorted ascending without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSelection(Vec<RegionCode>);

impl RegionSelection {
    pub fn all() -> Self {
        RegionSelection(RegionCode::all())
    }

    pub fn codes(&self) -> &[RegionCode] {
        &self.0
    }

    pub fn into_codes(self) -> Vec<RegionCode> {
        self.0
    }
}

impl FromStr for RegionSelection {
    type Err = RegionCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut codes = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(RegionCode::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if codes.is_empty() {
            return Err(RegionCodeError::Empty);
        }
        codes.sort();
        codes.dedup();
        Ok(RegionSelection(codes))
    }
}
