use anyhow::anyhow;
use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Returns the next future 09:00 local occurrence of the user's birthday
/// month/day in the given timezone, as an absolute UTC instant.
///
/// The validation layer rejects unknown timezone names before records reach
/// the scheduler, so the error path here only guards against stale records.
pub fn next_birthday_notification(
    birthday: NaiveDate,
    timezone: &str,
) -> anyhow::Result<DateTime<Utc>> {
    let tz = timezone
        .parse::<Tz>()
        .map_err(|_| anyhow!("invalid timezone: {timezone}"))?;
    Ok(next_occurrence(birthday, tz, Utc::now()))
}

/// Deterministic inner calculation, parameterized on `now`
pub(crate) fn next_occurrence(birthday: NaiveDate, tz: Tz, now: DateTime<Utc>) -> DateTime<Utc> {
    let local_now = now.with_timezone(&tz);
    let mut candidate = nine_am_local(birthday_in_year(birthday, local_now.year()), tz);
    // the notification instant must be strictly in the future
    if candidate <= local_now {
        candidate = nine_am_local(birthday_in_year(birthday, local_now.year() + 1), tz);
    }
    candidate.with_timezone(&Utc)
}

// Feb 29 collapses to Feb 28 in non-leap years
fn birthday_in_year(birthday: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, birthday.month(), 28))
        .unwrap_or(birthday)
}

// 09:00 wall clock on the given date in the target zone; an ambiguous local
// time resolves to the earlier offset, a nonexistent one moves forward an hour
fn nine_am_local(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    let nine = date
        .and_hms_opt(9, 0, 0)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
    match tz.from_local_datetime(&nine) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => tz
            .from_local_datetime(&(nine + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&nine)),
    }
}
