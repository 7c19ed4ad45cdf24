//! Billing cycle arithmetic
//!
//! Due-date rollover and cost annualization. The dashboard reads stored due
//! dates and never recomputes them, so `next_due_date` is a standalone
//! utility for callers that advance a cycle after payment.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::models::BillingFrequency;

/// Number of days in the given month
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Advance a due date by one billing cycle
///
/// MONTHLY keeps the day-of-month, clamping when the target month is shorter
/// (Jan 31 -> Feb 28/29); December rolls into January of the next year.
/// YEARLY keeps month and day; a Feb 29 input clamps to Feb 28 on non-leap
/// targets. The time of day is preserved.
pub fn next_due_date(current: DateTime<Utc>, frequency: BillingFrequency) -> DateTime<Utc> {
    let (year, month) = match frequency {
        BillingFrequency::Monthly => {
            if current.month() == 12 {
                (current.year() + 1, 1)
            } else {
                (current.year(), current.month() + 1)
            }
        }
        BillingFrequency::Yearly => (current.year() + 1, current.month()),
    };

    let day = current.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.and_time(current.time()).and_utc())
        .unwrap_or(current)
}

/// Equivalent yearly cost of a subscription: `cost * 12` for monthly
/// billing, `cost` unchanged for yearly billing.
pub fn annualize(cost: f64, frequency: BillingFrequency) -> f64 {
    match frequency {
        BillingFrequency::Monthly => cost * 12.0,
        BillingFrequency::Yearly => cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_monthly_advance_simple() {
        let next = next_due_date(utc(2025, 3, 15), BillingFrequency::Monthly);
        assert_eq!(next, utc(2025, 4, 15));
    }

    #[test]
    fn test_monthly_advance_clamps_to_short_month() {
        // Jan 31 -> Feb 28 in a non-leap year
        let next = next_due_date(utc(2025, 1, 31), BillingFrequency::Monthly);
        assert_eq!(next, utc(2025, 2, 28));

        // Jan 31 -> Feb 29 in a leap year
        let next = next_due_date(utc(2024, 1, 31), BillingFrequency::Monthly);
        assert_eq!(next, utc(2024, 2, 29));

        // Mar 31 -> Apr 30
        let next = next_due_date(utc(2025, 3, 31), BillingFrequency::Monthly);
        assert_eq!(next, utc(2025, 4, 30));
    }

    #[test]
    fn test_monthly_advance_december_rolls_year() {
        let next = next_due_date(utc(2025, 12, 20), BillingFrequency::Monthly);
        assert_eq!(next, utc(2026, 1, 20));
    }

    #[test]
    fn test_yearly_advance() {
        let next = next_due_date(utc(2025, 6, 10), BillingFrequency::Yearly);
        assert_eq!(next, utc(2026, 6, 10));
    }

    #[test]
    fn test_yearly_advance_leap_day_clamps() {
        // Feb 29 -> Feb 28 when the next year is not a leap year
        let next = next_due_date(utc(2024, 2, 29), BillingFrequency::Yearly);
        assert_eq!(next, utc(2025, 2, 28));
    }

    #[test]
    fn test_preserves_time_of_day() {
        let current = Utc.with_ymd_and_hms(2025, 5, 3, 23, 59, 59).unwrap();
        let next = next_due_date(current, BillingFrequency::Monthly);
        assert_eq!(next.time(), current.time());
    }

    #[test]
    fn test_annualize() {
        assert_eq!(annualize(10.0, BillingFrequency::Monthly), 120.0);
        assert_eq!(annualize(99.0, BillingFrequency::Yearly), 99.0);
    }

    #[test]
    fn test_annualize_is_linear() {
        for freq in [BillingFrequency::Monthly, BillingFrequency::Yearly] {
            let k = 3.5;
            let cost = 42.0;
            assert_eq!(annualize(k * cost, freq), k * annualize(cost, freq));
        }
    }
}
