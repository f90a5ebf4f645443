//! Set of weekdays a class meets on.

use chrono::Weekday;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::{BitOr, BitOrAssign};

/// Weekdays as a bitset indexed Sunday=0 .. Saturday=6.
///
/// Iteration is always in index order, so duplicates collapse and the
/// insertion order is not kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);

    /// RFC 5545 BYDAY codes, by index.
    pub const CODES: [&'static str; 7] = ["SU", "MO", "TU", "WE", "TH", "FR", "SA"];

    /// Returns the index of a two-letter BYDAY code (case-insensitive).
    #[must_use]
    pub fn index_of(code: &str) -> Option<u8> {
        Self::CODES
            .iter()
            .position(|c| c.eq_ignore_ascii_case(code))
            .and_then(|i| u8::try_from(i).ok())
    }

    /// Set holding a single day. Indices past Saturday give the empty set.
    #[must_use]
    pub const fn single(index: u8) -> Self {
        if index < 7 { Self(1 << index) } else { Self::EMPTY }
    }

    pub fn insert(&mut self, index: u8) {
        *self |= Self::single(index);
    }

    #[must_use]
    pub const fn contains(self, index: u8) -> bool {
        index < 7 && self.0 & (1 << index) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.iter().count()
    }

    /// Active indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..7).filter(move |&i| self.contains(i))
    }

    /// Lowest active index.
    #[must_use]
    pub fn first(self) -> Option<u8> {
        self.iter().next()
    }

    /// Active days as BYDAY codes.
    #[must_use]
    pub fn codes(self) -> Vec<&'static str> {
        self.iter().map(|i| Self::CODES[usize::from(i)]).collect()
    }
}

impl From<Weekday> for WeekdaySet {
    fn from(day: Weekday) -> Self {
        // num_days_from_sunday is always < 7
        Self::single(u8::try_from(day.num_days_from_sunday()).unwrap_or(u8::MAX))
    }
}

impl FromIterator<u8> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, i| set | Self::single(i))
    }
}

impl BitOr for WeekdaySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for WeekdaySet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Display for WeekdaySet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.codes().join(","))
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for index in self.iter() {
            seq.serialize_element(&index)?;
        }
        seq.end()
    }
}
