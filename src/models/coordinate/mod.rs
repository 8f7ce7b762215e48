// Coordinate module
// Cell addressing for the day × time-slot grid

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One dimension of the schedule grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    Days,
    TimeSlots,
}

impl AxisKind {
    /// The other dimension.
    pub fn other(self) -> Self {
        match self {
            AxisKind::Days => AxisKind::TimeSlots,
            AxisKind::TimeSlots => AxisKind::Days,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AxisKind::Days => "days",
            AxisKind::TimeSlots => "time slots",
        }
    }
}

impl Default for AxisKind {
    fn default() -> Self {
        AxisKind::TimeSlots
    }
}

/// A cell position, serialized as the canonical key `"{day}-{time}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub day: usize,
    pub time: usize,
}

impl Coordinate {
    pub fn new(day: usize, time: usize) -> Self {
        Self { day, time }
    }

    /// Component along `axis`.
    pub fn along(&self, axis: AxisKind) -> usize {
        match axis {
            AxisKind::Days => self.day,
            AxisKind::TimeSlots => self.time,
        }
    }

    /// Builds a coordinate from its position on `merge_axis` and on the other axis.
    pub fn from_axes(merge_axis: AxisKind, merge: usize, fixed: usize) -> Self {
        match merge_axis {
            AxisKind::Days => Self::new(merge, fixed),
            AxisKind::TimeSlots => Self::new(fixed, merge),
        }
    }

    /// Same coordinate with the `axis` component replaced.
    pub fn with(&self, axis: AxisKind, value: usize) -> Self {
        match axis {
            AxisKind::Days => Self::new(value, self.time),
            AxisKind::TimeSlots => Self::new(self.day, value),
        }
    }

    /// The `count` cells following this one along `axis`.
    pub fn following(&self, axis: AxisKind, count: usize) -> Vec<Coordinate> {
        let start = self.along(axis);
        (1..=count).map(|offset| self.with(axis, start + offset)).collect()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.time)
    }
}

impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, time) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid cell key '{}': expected DAY-TIME", s))?;

        let parse = |part: &str| -> Result<usize, String> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("Invalid cell key '{}': expected DAY-TIME", s));
            }
            part.parse::<usize>()
                .map_err(|e| format!("Invalid cell key '{}': {}", s, e))
        };

        Ok(Self::new(parse(day)?, parse(time)?))
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = Coordinate;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a cell key of the form \"DAY-TIME\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}
