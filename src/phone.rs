//! Canonical phone numbers.
//!
//! Numbers are stored as E.164 strings (`+13125550100`) and rendered for
//! display in national format for North American numbers (country code 1)
//! and in international format for everything else.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// ITU country codes that are two digits long. Every other code outside
/// the single-digit zones 1 and 7 is three digits.
const TWO_DIGIT_COUNTRY_CODES: &[u16] = &[
    20, 27, 30, 31, 32, 33, 34, 36, 39, 40, 41, 43, 44, 45, 46, 47, 48, 49, 51, 52, 53, 54, 55,
    56, 57, 58, 60, 61, 62, 63, 64, 65, 66, 81, 82, 84, 86, 90, 91, 92, 93, 94, 95, 98,
];

const MIN_NATIONAL_LEN: usize = 4;
const MAX_NATIONAL_LEN: usize = 14;
const NANP_NATIONAL_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneNumberError {
    #[error("phone number is empty")]
    Empty,
    #[error("unexpected character '{0}' in phone number")]
    InvalidCharacter(char),
    #[error("phone number has no country code")]
    MissingCountryCode,
    #[error("invalid country code in '{0}'")]
    InvalidCountryCode(String),
    #[error("national number must be {min}..={max} digits, got {got}")]
    InvalidLength { min: usize, max: usize, got: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    country_code: u16,
    national_number: String,
}

impl PhoneNumber {
    pub fn new(country_code: u16, national_number: &str) -> Result<Self, PhoneNumberError> {
        if country_code == 0 || country_code > 999 {
            return Err(PhoneNumberError::InvalidCountryCode(country_code.to_string()));
        }
        if let Some(c) = national_number.chars().find(|c| !c.is_ascii_digit()) {
            return Err(PhoneNumberError::InvalidCharacter(c));
        }
        let (min, max) = if country_code == 1 {
            (NANP_NATIONAL_LEN, NANP_NATIONAL_LEN)
        } else {
            (MIN_NATIONAL_LEN, MAX_NATIONAL_LEN)
        };
        let got = national_number.len();
        if got < min || got > max {
            return Err(PhoneNumberError::InvalidLength { min, max, got });
        }
        Ok(Self {
            country_code,
            national_number: national_number.to_string(),
        })
    }

    pub fn country_code(&self) -> u16 {
        self.country_code
    }

    pub fn national_number(&self) -> &str {
        &self.national_number
    }

    /// Storage form, e.g. `+13125550100`.
    pub fn to_e164(&self) -> String {
        format!("+{}{}", self.country_code, self.national_number)
    }

    /// `(312) 555-0100` for North American numbers, bare digits otherwise.
    pub fn as_national(&self) -> String {
        if self.country_code == 1 {
            let n = &self.national_number;
            format!("({}) {}-{}", &n[..3], &n[3..6], &n[6..])
        } else {
            self.national_number.clone()
        }
    }

    /// `+1 312-555-0100` for North American numbers, `+<cc> <digits>` otherwise.
    pub fn as_international(&self) -> String {
        if self.country_code == 1 {
            let n = &self.national_number;
            format!("+1 {}-{}-{}", &n[..3], &n[3..6], &n[6..])
        } else {
            format!("+{} {}", self.country_code, self.national_number)
        }
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.country_code == 1 {
            f.write_str(&self.as_national())
        } else {
            f.write_str(&self.as_international())
        }
    }
}

fn country_code_len(digits: &str) -> Option<usize> {
    let first = digits.chars().next()?;
    match first {
        '0' => None,
        '1' | '7' => Some(1),
        _ => {
            let two: u16 = digits.get(..2)?.parse().ok()?;
            if TWO_DIGIT_COUNTRY_CODES.contains(&two) {
                Some(2)
            } else {
                Some(3)
            }
        }
    }
}

impl FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    /// Accepts E.164 (`+44 20 7946 0958`) or North American numbers without
    /// a leading `+` (`312-555-0100`, `1 (312) 555-0100`). Spaces, dashes,
    /// dots and parentheses are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        let (international, body) = match trimmed.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut digits = String::with_capacity(body.len());
        for c in body.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                other => return Err(PhoneNumberError::InvalidCharacter(other)),
            }
        }
        if digits.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        if !international {
            return match digits.len() {
                NANP_NATIONAL_LEN => PhoneNumber::new(1, &digits),
                11 if digits.starts_with('1') => PhoneNumber::new(1, &digits[1..]),
                _ => Err(PhoneNumberError::MissingCountryCode),
            };
        }

        let cc_len = country_code_len(&digits)
            .ok_or_else(|| PhoneNumberError::InvalidCountryCode(trimmed.to_string()))?;
        if digits.len() <= cc_len {
            return Err(PhoneNumberError::InvalidLength {
                min: MIN_NATIONAL_LEN,
                max: MAX_NATIONAL_LEN,
                got: 0,
            });
        }
        let country_code: u16 = digits[..cc_len]
            .parse()
            .map_err(|_| PhoneNumberError::InvalidCountryCode(trimmed.to_string()))?;
        PhoneNumber::new(country_code, &digits[cc_len..])
    }
}
