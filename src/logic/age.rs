// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Age derived from the date of birth; the only writer of the read-only age field.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::logic::display::{clear_error, show_error};
use crate::logic::validator::validate_field;
use crate::models::document::{Document, NodeId};
use crate::models::rules::RuleTable;

pub const MIN_AGE: i32 = 15;
pub const MAX_AGE: i32 = 99;

/// Notice raised when a picked date yields an age outside the window.
pub const AGE_NOTICE: &str = "Age must be between 15 and 99 years.";

/// Field error shown on the date input after it loses focus.
pub const DOB_RANGE_MESSAGE: &str = "Date of birth must indicate an age between 15 and 99 years";

/// Field error for text that is not a calendar date.
pub const DOB_FORMAT_MESSAGE: &str = "Please enter a valid date (YYYY-MM-DD)";

/// The date-of-birth input and the age input it drives.
#[derive(Clone, Copy, Debug)]
pub struct AgeFields {
    pub dob: NodeId,
    pub age: NodeId,
}

/// Completed years between `dob` and `today`.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

pub fn in_window(age: i32) -> bool {
    (MIN_AGE..=MAX_AGE).contains(&age)
}

/// Value format of a date input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date input value.
pub fn parse_dob(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Move a date by whole years; Feb 29 rolls over to Mar 1 in common years.
fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}

/// Earliest and latest acceptable birth dates relative to `today`.
pub fn dob_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (shift_years(today, -MAX_AGE), shift_years(today, -MIN_AGE))
}

/// Recompute the age after the date changed.
///
/// Writes the age when it falls inside the window and returns a blocking
/// notice (with the age field blanked) when it does not. An empty or
/// unparsable date leaves everything untouched.
pub fn on_date_change(
    doc: &mut Document,
    rules: &RuleTable,
    fields: AgeFields,
    today: NaiveDate,
) -> Option<&'static str> {
    let dob = parse_dob(doc.value(fields.dob))?;
    let age = age_on(dob, today);
    debug!(%dob, age, "age derived");

    if in_window(age) {
        doc.set_value(fields.age, age.to_string());
        validate_field(doc, rules, fields.age);
        None
    } else {
        doc.set_value(fields.age, "");
        Some(AGE_NOTICE)
    }
}

/// Check the raw date against the allowed birth-date window once focus leaves.
///
/// Out-of-window dates get a field error and blank the age; valid dates clear
/// the error and recompute the age, which may still return the change notice.
pub fn on_date_blur(
    doc: &mut Document,
    rules: &RuleTable,
    fields: AgeFields,
    today: NaiveDate,
) -> Option<&'static str> {
    let raw = doc.value(fields.dob).trim().to_string();
    if raw.is_empty() {
        clear_error(doc, fields.dob);
        return None;
    }

    let Some(dob) = parse_dob(&raw) else {
        show_error(doc, fields.dob, DOB_FORMAT_MESSAGE);
        doc.set_value(fields.age, "");
        return None;
    };

    let (earliest, latest) = dob_window(today);
    if dob < earliest || dob > latest {
        show_error(doc, fields.dob, DOB_RANGE_MESSAGE);
        doc.set_value(fields.age, "");
        None
    } else {
        clear_error(doc, fields.dob);
        on_date_change(doc, rules, fields, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::display::error_text;
    use crate::models::document::{InputType, Node, Tag};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup(dob: &str) -> (Document, RuleTable, AgeFields) {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append(root, Node::new(Tag::Div).with_class("inputfield"));
        let dob = doc.append(
            a,
            Node::input(InputType::Date)
                .with_id("dob")
                .with_value(dob)
                .required(),
        );
        let b = doc.append(root, Node::new(Tag::Div).with_class("inputfield"));
        let age = doc.append(
            b,
            Node::input(InputType::Number)
                .with_id("age")
                .required()
                .readonly(),
        );
        (doc, RuleTable::registration().unwrap(), AgeFields { dob, age })
    }

    #[test]
    fn age_counts_only_completed_years() {
        let today = ymd(2024, 6, 15);
        assert_eq!(age_on(ymd(2000, 1, 1), today), 24);
        assert_eq!(age_on(ymd(2000, 6, 15), today), 24);
        assert_eq!(age_on(ymd(2000, 6, 16), today), 23);
        assert_eq!(age_on(ymd(2000, 7, 1), today), 23);
        assert_eq!(age_on(ymd(2010, 1, 1), today), 14);
    }

    #[test]
    fn too_young_blanks_age_and_raises_notice() {
        let (mut doc, rules, fields) = setup("2010-01-01");
        doc.set_value(fields.age, "30");

        let notice = on_date_change(&mut doc, &rules, fields, ymd(2024, 6, 15));

        assert_eq!(notice, Some(AGE_NOTICE));
        assert_eq!(doc.value(fields.age), "");
    }

    #[test]
    fn valid_dob_writes_age() {
        let (mut doc, rules, fields) = setup("2000-01-01");

        let notice = on_date_change(&mut doc, &rules, fields, ymd(2024, 6, 15));

        assert_eq!(notice, None);
        assert_eq!(doc.value(fields.age), "24");
    }

    #[test]
    fn writing_age_clears_stale_age_error() {
        let (mut doc, rules, fields) = setup("2000-01-01");
        show_error(&mut doc, fields.age, "Age must be between 15 and 99");

        on_date_change(&mut doc, &rules, fields, ymd(2024, 6, 15));

        assert_eq!(error_text(&doc, fields.age), None);
    }

    #[test]
    fn empty_dob_is_neutral() {
        let (mut doc, rules, fields) = setup("");
        doc.set_value(fields.age, "40");

        assert_eq!(on_date_change(&mut doc, &rules, fields, ymd(2024, 6, 15)), None);
        assert_eq!(on_date_blur(&mut doc, &rules, fields, ymd(2024, 6, 15)), None);

        assert_eq!(doc.value(fields.age), "40");
        assert_eq!(error_text(&doc, fields.dob), None);
    }

    #[test]
    fn blur_outside_window_shows_field_error() {
        let (mut doc, rules, fields) = setup("1900-05-05");
        doc.set_value(fields.age, "99");

        on_date_blur(&mut doc, &rules, fields, ymd(2024, 6, 15));

        assert_eq!(error_text(&doc, fields.dob), Some(DOB_RANGE_MESSAGE));
        assert_eq!(doc.value(fields.age), "");
    }

    #[test]
    fn blur_inside_window_clears_error_and_recomputes() {
        let (mut doc, rules, fields) = setup("2010-01-01");
        on_date_blur(&mut doc, &rules, fields, ymd(2024, 6, 15));
        assert!(error_text(&doc, fields.dob).is_some());

        doc.set_value(fields.dob, "1990-03-20");
        let notice = on_date_blur(&mut doc, &rules, fields, ymd(2024, 6, 15));

        assert_eq!(notice, None);
        assert_eq!(error_text(&doc, fields.dob), None);
        assert_eq!(doc.value(fields.age), "34");
    }

    #[test]
    fn blur_rejects_unparsable_text() {
        let (mut doc, rules, fields) = setup("31/12/1999");
        on_date_blur(&mut doc, &rules, fields, ymd(2024, 6, 15));
        assert_eq!(error_text(&doc, fields.dob), Some(DOB_FORMAT_MESSAGE));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let today = ymd(2024, 6, 15);
        let (earliest, latest) = dob_window(today);
        assert_eq!(earliest, ymd(1925, 6, 15));
        assert_eq!(latest, ymd(2009, 6, 15));
        assert!(in_window(age_on(latest, today)));
        assert!(in_window(age_on(earliest, today)));
    }

    #[test]
    fn leap_day_window_rolls_forward() {
        let (earliest, latest) = dob_window(ymd(2024, 2, 29));
        assert_eq!(earliest, ymd(1925, 3, 1));
        assert_eq!(latest, ymd(2009, 3, 1));
    }
}
