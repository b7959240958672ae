use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// One budget period. Canonical form is `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct MonthKey {
    year: i32,
    month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid month '{0}'. Use YYYY-MM (e.g. 2025-12)")]
pub(crate) struct InvalidMonthKey(pub(crate) String);

impl MonthKey {
    pub(crate) fn new(year: i32, month: u32) -> Result<Self, InvalidMonthKey> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(InvalidMonthKey(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    pub(crate) fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    #[cfg(test)]
    pub(crate) fn month(&self) -> u32 {
        self.month
    }

    pub(crate) fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub(crate) fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl FromStr for MonthKey {
    type Err = InvalidMonthKey;

    /// Accepts `2025-12` and `2025-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || InvalidMonthKey(trimmed.to_string());
        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
