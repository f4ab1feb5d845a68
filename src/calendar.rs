use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::errors::{LoanError, Result};

/// first billing date on or after `date` for the given day of month
///
/// when `date` is already past the billing day the anchor moves to the next
/// month. billing days beyond the end of a month fall on its last day.
pub fn billing_anchor(date: NaiveDate, billing_day: u32) -> Result<NaiveDate> {
    if billing_day == 0 || billing_day > 31 {
        return Err(LoanError::InvalidBillingDay { day: billing_day });
    }

    let month_start = first_of_month(date)?;
    let anchor = day_in_month(month_start, billing_day)?;
    // a date on the billing day anchors to itself; the capped eta relies on
    // this and lands a period short for end dates that are billing days
    if date <= anchor {
        return Ok(anchor);
    }

    day_in_month(add_months(month_start, 1)?, billing_day)
}

/// whole months from `from` to `to`, dropping any trailing partial month
///
/// negative when `to` is before `from`
pub fn month_difference(to: NaiveDate, from: NaiveDate) -> Result<i32> {
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;

    if months > 0 && add_months(from, months)? > to {
        months -= 1;
    } else if months < 0 && add_months(from, months)? < to {
        months += 1;
    }

    Ok(months)
}

/// shift by calendar months, clamping to the last day of shorter months
pub fn add_months(date: NaiveDate, months: i32) -> Result<NaiveDate> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };

    shifted.ok_or_else(|| LoanError::InvalidDate {
        message: format!("{} shifted by {} months is out of range", date, months),
    })
}

pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| LoanError::InvalidDate {
            message: format!("{} shifted by {} days is out of range", date, days),
        })
}

fn first_of_month(date: NaiveDate) -> Result<NaiveDate> {
    date.with_day(1).ok_or_else(|| LoanError::InvalidDate {
        message: format!("no first day of month for {}", date),
    })
}

/// `day` within the month starting at `month_start`, clamped to its last day
fn day_in_month(month_start: NaiveDate, day: u32) -> Result<NaiveDate> {
    let last_day = add_days(add_months(month_start, 1)?, -1)?.day();
    month_start
        .with_day(day.min(last_day))
        .ok_or_else(|| LoanError::InvalidDate {
            message: format!("day {} does not exist in {}", day, month_start.format("%Y-%m")),
        })
}
