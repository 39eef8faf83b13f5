//! Hour-of-day extraction from free-form export time fields.
//!
//! Export time fields look like `"Dec 25, 2025, 9:41:07\u{202F}PM PST"` but
//! vary between locales and export versions. [`parse_hour`] tries a cascade
//! of patterns, each searched anywhere in the field, and falls back to `0`.

use winnow::{
    ModalResult, Parser as _,
    ascii::space0,
    combinator::{alt, opt, terminated},
    token::{one_of, take_while},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Converts a 12-hour clock value to 24-hour
    fn to_24h(self, hour: u8) -> u8 {
        match self {
            Meridiem::Pm if hour < 12 => hour + 12,
            Meridiem::Am if hour == 12 => 0,
            _ => hour,
        }
    }
}

type Input<'src> = &'src str;

/// One or two ASCII digits
fn hour_digits(input: &mut Input<'_>) -> ModalResult<u8> {
    take_while(1..=2, |c: char| c.is_ascii_digit())
        .parse_to()
        .parse_next(input)
}

fn minute_digits(input: &mut Input<'_>) -> ModalResult<()> {
    take_while(2, |c: char| c.is_ascii_digit())
        .void()
        .parse_next(input)
}

/// `AM` or `PM`, case-insensitive
fn meridiem(input: &mut Input<'_>) -> ModalResult<Meridiem> {
    terminated(
        alt((
            one_of(['A', 'a']).value(Meridiem::Am),
            one_of(['P', 'p']).value(Meridiem::Pm),
        )),
        one_of(['M', 'm']),
    )
    .parse_next(input)
}

/// `9:41 PM` or `9:41:07 PM`
fn clock_with_minutes(input: &mut Input<'_>) -> ModalResult<u8> {
    let (hour, _, _, _, _, meridiem) = (
        hour_digits,
        ':',
        minute_digits,
        opt((':', minute_digits)),
        space0,
        meridiem,
    )
        .parse_next(input)?;
    Ok(meridiem.to_24h(hour))
}

/// `9 PM`
fn clock_hour_only(input: &mut Input<'_>) -> ModalResult<u8> {
    let (hour, _, meridiem) = (hour_digits, space0, meridiem).parse_next(input)?;
    Ok(meridiem.to_24h(hour))
}

/// `21:` without a meridiem
fn bare_hour_with_colon(input: &mut Input<'_>) -> ModalResult<u8> {
    terminated(hour_digits, ':').parse_next(input)
}

/// Runs `parser` at every character boundary and returns the leftmost match.
fn search<O>(field: &str, mut parser: impl FnMut(&mut Input<'_>) -> ModalResult<O>) -> Option<O> {
    field.char_indices().find_map(|(offset, _)| {
        let mut input = &field[offset..];
        parser(&mut input).ok()
    })
}

/// Replaces narrow and regular no-break spaces with plain spaces
fn sanitize(field: &str) -> String {
    field.replace(['\u{202F}', '\u{00A0}'], " ")
}

/// Extracts an hour of the day (`0..=23`) from an export time field.
///
/// Patterns, in priority order:
/// 1. `H:MM AM|PM` (optionally `H:MM:SS AM|PM`) anywhere
/// 2. `H AM|PM` anywhere
/// 3. `H:` anywhere
/// 4. leading `H`
///
/// Fields that match none of them yield `0`. Two-digit values above 23 are
/// wrapped modulo 24.
///
/// # Examples
///
/// ```
/// # use settle_dataset::time::parse_hour;
/// assert_eq!(parse_hour("Dec 25, 2025, 9:41:07\u{202F}PM PST"), 21);
/// assert_eq!(parse_hour("12 am"), 0);
/// assert_eq!(parse_hour("no time here"), 0);
/// ```
pub fn parse_hour(field: &str) -> u8 {
    let field = sanitize(field);

    let hour = search(&field, clock_with_minutes)
        .or_else(|| search(&field, clock_hour_only))
        .or_else(|| search(&field, bare_hour_with_colon))
        .or_else(|| {
            let mut input = field.as_str();
            hour_digits(&mut input).ok()
        })
        .unwrap_or(0);

    hour % 24
}
