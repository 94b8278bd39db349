//! Earnings aggregation over a doctor's completed appointments.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::appointment::CompletedAppointment;

/// Earnings summary for a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Earnings {
    /// Sum over all completed appointments.
    pub total: Decimal,
    /// Sum over completed appointments last updated in the current calendar
    /// month.
    pub this_month: Decimal,
    /// Count of completed appointments.
    pub total_appointments: u64,
}

/// Summarize completed appointments as of `now`.
///
/// "This month" matches on the (month, year) pair of the appointment's last
/// update against `now` - a calendar bucket, not a rolling 30-day window, so
/// a December completion stops counting the moment January starts.
#[must_use]
pub fn summarize(completed: &[CompletedAppointment], now: DateTime<Utc>) -> Earnings {
    let total: Decimal = completed.iter().map(|a| a.amount).sum();

    let this_month: Decimal = completed
        .iter()
        .filter(|a| a.updated_at.month() == now.month() && a.updated_at.year() == now.year())
        .map(|a| a.amount)
        .sum();

    Earnings {
        total,
        this_month,
        total_appointments: completed.len() as u64,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn completed(amount: i64, updated_at: DateTime<Utc>) -> CompletedAppointment {
        CompletedAppointment {
            amount: Decimal::new(amount, 0),
            updated_at,
        }
    }

    #[test]
    fn test_empty_input() {
        let earnings = summarize(&[], at(2026, 8, 7));
        assert_eq!(earnings, Earnings::default());
    }

    #[test]
    fn test_total_spans_all_months_this_month_does_not() {
        let now = at(2026, 8, 7);
        let appointments = vec![
            completed(100, at(2026, 8, 2)),
            completed(50, at(2026, 5, 20)),
        ];

        let earnings = summarize(&appointments, now);
        assert_eq!(earnings.total, Decimal::new(150, 0));
        assert_eq!(earnings.this_month, Decimal::new(100, 0));
        assert_eq!(earnings.total_appointments, 2);
    }

    #[test]
    fn test_month_match_requires_same_year() {
        // Last December must not count toward this December's total a year
        // on, nor toward January.
        let appointments = vec![completed(75, at(2025, 12, 31))];

        let january = summarize(&appointments, at(2026, 1, 1));
        assert_eq!(january.this_month, Decimal::ZERO);
        assert_eq!(january.total, Decimal::new(75, 0));

        let next_december = summarize(&appointments, at(2026, 12, 15));
        assert_eq!(next_december.this_month, Decimal::ZERO);

        let same_december = summarize(&appointments, at(2025, 12, 1));
        assert_eq!(same_december.this_month, Decimal::new(75, 0));
    }

    #[test]
    fn test_wire_format() {
        let earnings = summarize(&[completed(20, at(2026, 8, 1))], at(2026, 8, 7));
        let json = serde_json::to_value(&earnings).unwrap();
        assert!(json.get("thisMonth").is_some());
        assert!(json.get("totalAppointments").is_some());
        assert_eq!(json["totalAppointments"], 1);
    }
}
