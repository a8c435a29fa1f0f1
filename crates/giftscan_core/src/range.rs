use std::ops::RangeInclusive;

use crate::QueryError;

/// The caller's `"<start>-<end>"` range after parsing, with the ends put in order.
/// Not yet bounded by any catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedRange {
    pub start: i64,
    pub end: i64,
}

impl RequestedRange {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let invalid = || QueryError::InvalidRangeFormat(raw.to_string());
        let mut parts = raw.split('-');
        let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let start: i64 = start.trim().parse().map_err(|_| invalid())?;
        let end: i64 = end.trim().parse().map_err(|_| invalid())?;

        if start > end {
            Ok(Self {
                start: end,
                end: start,
            })
        } else {
            Ok(Self { start, end })
        }
    }

    /// Bound the range to `[1, max_id]`. Returns `None` when nothing is left.
    pub fn clamp(self, max_id: u64) -> Option<IdRange> {
        let start = self.start.max(1);
        let end = self.end.min(i64::try_from(max_id).unwrap_or(i64::MAX));
        if start > end {
            return None;
        }
        // Both ends are >= 1 here.
        IdRange::new(start as u64, end as u64)
    }
}

/// Non-empty inclusive range of item ids, `1 <= start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    start: u64,
    end: u64,
}

impl IdRange {
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start >= 1 && start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn contains(&self, id: u64) -> bool {
        (self.start..=self.end).contains(&id)
    }

    pub fn ids(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}
