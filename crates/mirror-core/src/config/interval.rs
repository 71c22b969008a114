//! `HH:MM:SS` sync interval

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::Error;

/// Time between the starts of two passes, written as `HH:MM:SS`.
///
/// Each field is exactly two digits. Fields are not range checked, so
/// `00:90:00` is ninety minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SyncInterval(Duration);

impl SyncInterval {
    pub fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

impl FromStr for SyncInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidInterval {
            value: s.to_string(),
        };

        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != 3 {
            return Err(invalid());
        }

        let mut secs = 0u64;
        for (field, scale) in fields.iter().zip([3600u64, 60, 1]) {
            if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let value: u64 = field.parse().map_err(|_| invalid())?;
            secs += value * scale;
        }

        Ok(Self::from_secs(secs))
    }
}

impl fmt::Display for SyncInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.as_secs();
        write!(
            f,
            "{:02}:{:02}:{:02}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}

impl Serialize for SyncInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SyncInterval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
