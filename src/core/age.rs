use chrono::{Datelike, NaiveDate};

/// Whole years elapsed between `birth_date` and `today`
///
/// The birthday counts as reached on its calendar day. A birth date after
/// `today` is not rejected and yields a non-positive age.
#[inline]
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();

    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }

    age
}
