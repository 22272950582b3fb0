//! Extension period value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Number of days to add to a VIP membership.
///
/// Always positive. There is deliberately no ceiling: repeated extensions
/// accumulate without limit, and only an unrepresentable resulting instant
/// is rejected when the period is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PeriodDays(u32);

impl PeriodDays {
    /// Creates a period from a raw day count.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfRange` if `days` is not in `1..=u32::MAX`.
    pub fn new(days: i64) -> Result<Self, ValidationError> {
        if days < 1 || days > i64::from(u32::MAX) {
            return Err(ValidationError::out_of_range(
                "period_days",
                1,
                i64::from(u32::MAX),
                days,
            ));
        }
        Ok(Self(days as u32))
    }

    /// Day count as a signed value for date arithmetic.
    pub fn days(&self) -> i64 {
        i64::from(self.0)
    }
}

impl TryFrom<i64> for PeriodDays {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PeriodDays> for i64 {
    fn from(period: PeriodDays) -> Self {
        period.days()
    }
}
