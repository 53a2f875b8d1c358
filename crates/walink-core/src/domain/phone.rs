use serde::Serialize;
use std::fmt;

/// Joins several numbers inside one exported phone cell.
pub const MULTI_VALUE_SEPARATOR: &str = " ::: ";

pub const COUNTRY_CODE: &str = "91";
pub const LOCAL_NUMBER_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneRule {
    /// 12 digits starting with the country code; the code was dropped.
    CountryCode,
    /// 11 digits starting with a trunk `0`; the zero was dropped.
    TrunkPrefix,
    /// More than 10 digits otherwise; only the last 10 were kept.
    LastTen,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneNote {
    EmptyValue,
    UnexpectedLength(usize),
}

impl fmt::Display for PhoneNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneNote::EmptyValue => write!(f, "Empty phone value"),
            PhoneNote::UnexpectedLength(len) => {
                write!(f, "Unexpected normalized length: {len} digits.")
            }
        }
    }
}

impl Serialize for PhoneNote {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedPhone {
    pub digits: String,
    pub rule: Option<PhoneRule>,
    pub note: Option<PhoneNote>,
}

impl NormalizedPhone {
    fn empty() -> Self {
        Self {
            digits: String::new(),
            rule: None,
            note: Some(PhoneNote::EmptyValue),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn note_text(&self) -> String {
        self.note.map(|note| note.to_string()).unwrap_or_default()
    }
}

/// Reduces a raw phone cell to a 10-digit local number when possible.
///
/// Never fails: anything that cannot be reduced to 10 digits is returned
/// as-is together with a [`PhoneNote`] describing what went wrong. A cell
/// holding several numbers is reduced to its first entry.
pub fn normalize_phone(raw: Option<&str>) -> NormalizedPhone {
    let Some(raw) = raw else {
        return NormalizedPhone::empty();
    };
    if raw.trim().is_empty() {
        return NormalizedPhone::empty();
    }

    let value = match raw.split_once(MULTI_VALUE_SEPARATOR) {
        Some((first, _)) => first.trim(),
        None => raw,
    };

    let digits: String = value.chars().filter(|ch| ch.is_ascii_digit()).collect();
    let (digits, rule) = apply_length_rule(digits);

    let note = if digits.len() != LOCAL_NUMBER_LEN {
        Some(PhoneNote::UnexpectedLength(digits.len()))
    } else {
        None
    };

    NormalizedPhone {
        digits,
        rule: Some(rule),
        note,
    }
}

pub fn normalize_phone_str(raw: &str) -> NormalizedPhone {
    normalize_phone(Some(raw))
}

// Digits are ASCII, so byte offsets are char offsets.
fn apply_length_rule(digits: String) -> (String, PhoneRule) {
    let len = digits.len();
    if len == 12 && digits.starts_with(COUNTRY_CODE) {
        return (digits[COUNTRY_CODE.len()..].to_string(), PhoneRule::CountryCode);
    }
    if len == 11 && digits.starts_with('0') {
        return (digits[1..].to_string(), PhoneRule::TrunkPrefix);
    }
    if len > LOCAL_NUMBER_LEN {
        return (digits[len - LOCAL_NUMBER_LEN..].to_string(), PhoneRule::LastTen);
    }
    (digits, PhoneRule::Unchanged)
}
