#![forbid(unsafe_code)]

//! Small free-function helpers.
//!
//! These take explicit arguments; nothing here patches or extends foreign
//! types.

use chrono::{Datelike, NaiveDate};

/// Clamp `value` into `[min, max]`.
///
/// Unlike `Ord::clamp`, a degenerate range (`min > max`) resolves to `min`
/// instead of panicking; degenerate ranges occur transiently while a
/// viewport is being shrunk.
#[must_use]
pub fn clamp<T: Ord>(value: T, min: T, max: T) -> T {
    if min > max {
        return min;
    }
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Replace the first item whose key matches, or append.
///
/// Returns the index the item landed at.
pub fn upsert<T, K, F>(items: &mut Vec<T>, item: T, key: F) -> usize
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let wanted = key(&item);
    match items.iter().position(|existing| key(existing) == wanted) {
        Some(index) => {
            items[index] = item;
            index
        }
        None => {
            items.push(item);
            items.len() - 1
        }
    }
}

/// Whole years between `dob` and `today`, birthday-aware.
///
/// Returns 0 when `dob` is in the future.
#[must_use]
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> u32 {
    if dob > today {
        return 0;
    }
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
