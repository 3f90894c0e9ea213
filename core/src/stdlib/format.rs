//! Format checkers: `email` and `phone`.
//!
//! These are deliberately simple syntactic checks. Callers needing stricter
//! validation register their own predicate under the same name.

use crate::registry::Function;
use crate::values::Datum;
use once_cell::sync::Lazy;
use regex::Regex;

pub(super) fn functions() -> Vec<Function> {
    vec![
        Function::predicate("email", 1, Some(1), email),
        Function::predicate("phone", 1, Some(2), phone),
    ]
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_\-\.\x{4e00}-\x{9fa5}])+@([A-Za-z0-9_\-\.])+\.([A-Za-z]{2,8})$")
        .unwrap()
});

fn email(args: &[Datum<'_>]) -> Result<(), String> {
    match args[0].as_str() {
        Some(address) if EMAIL_RE.is_match(address) => Ok(()),
        _ => Err("email format is incorrect".to_string()),
    }
}

/// A region's calling code and the national number patterns it accepts.
struct Region {
    code: &'static str,
    calling_code: &'static str,
    national: Regex,
}

fn region(code: &'static str, calling_code: &'static str, national: &str) -> Region {
    Region {
        code,
        calling_code,
        national: Regex::new(national).unwrap(),
    }
}

static REGIONS: Lazy<Vec<Region>> = Lazy::new(|| {
    vec![
        region("CN", "86", r"^(1[3-9]\d{9}|0?[1-9]\d{8,10})$"),
        region("US", "1", r"^1?[2-9]\d{2}[2-9]\d{6}$"),
        region("CA", "1", r"^1?[2-9]\d{2}[2-9]\d{6}$"),
        region("GB", "44", r"^0?(7\d{9}|[1-9]\d{8,9})$"),
        region("DE", "49", r"^0?(1[5-7]\d{8,9}|[2-9]\d{5,10})$"),
        region("FR", "33", r"^0?[1-9]\d{8}$"),
        region("JP", "81", r"^0?([789]0\d{8}|[1-9]\d{8})$"),
        region("IN", "91", r"^0?[6-9]\d{9}$"),
        region("HK", "852", r"^[2-9]\d{7}$"),
        region("TW", "886", r"^0?9\d{8}$"),
    ]
});

const NOT_A_NUMBER: &str = "the phone number supplied is not a number";
const BAD_FORMAT: &str = "phone format is incorrect";
const BAD_REGION: &str = "invalid country code";

/// `phone(value[, region])`. The region defaults to `CN`; a number written
/// with a leading `+` is checked against the region of its calling code.
fn phone(args: &[Datum<'_>]) -> Result<(), String> {
    let region_code = match args.get(1) {
        None => "CN".to_string(),
        Some(code) => code.as_str().ok_or(BAD_REGION)?.to_ascii_uppercase(),
    };
    let mut region = REGIONS
        .iter()
        .find(|region| region.code == region_code)
        .ok_or(BAD_REGION)?;

    let raw = args[0].as_str().ok_or(NOT_A_NUMBER)?;
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    let (international, digits) = match cleaned.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NOT_A_NUMBER.to_string());
    }

    let mut national = digits;
    if international {
        // Prefer the requested region when it shares the calling code.
        let dialed = std::iter::once(region)
            .chain(REGIONS.iter())
            .find(|candidate| digits.starts_with(candidate.calling_code))
            .ok_or(BAD_REGION)?;
        national = &digits[dialed.calling_code.len()..];
        region = dialed;
    }
    if region.national.is_match(national) {
        Ok(())
    } else {
        Err(BAD_FORMAT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        for ok in ["a@b.cn", "first.last@example.com", "张三@example.org", "x_y-z@mail.co"] {
            assert_eq!(email(&[Datum::str(ok)]), Ok(()), "{}", ok);
        }
        for bad in ["", "invalid email", "a@b", "@example.com", "a@b.c"] {
            assert_eq!(
                email(&[Datum::str(bad)]),
                Err("email format is incorrect".to_string()),
                "{}",
                bad
            );
        }
        assert!(email(&[Datum::Nil]).is_err());
    }

    fn check(number: &str, region: Option<&str>) -> Result<(), String> {
        let mut args = vec![Datum::str(number.to_string())];
        if let Some(region) = region {
            args.push(Datum::str(region.to_string()));
        }
        phone(&args)
    }

    #[test]
    fn test_phone_not_a_number() {
        assert_eq!(check("", Some("CN")), Err(NOT_A_NUMBER.to_string()));
        assert_eq!(check("abc", None), Err(NOT_A_NUMBER.to_string()));
        assert_eq!(check("+", None), Err(NOT_A_NUMBER.to_string()));
    }

    #[test]
    fn test_phone_default_region() {
        assert_eq!(check("13800138000", None), Ok(()));
        assert_eq!(check("138 0013 8000", Some("cn")), Ok(()));
        assert_eq!(check("010-12345678", Some("CN")), Ok(()));
        assert_eq!(check("12345", None), Err(BAD_FORMAT.to_string()));
    }

    #[test]
    fn test_phone_other_regions() {
        assert_eq!(check("(415) 555-2671", Some("US")), Ok(()));
        assert_eq!(check("07911123456", Some("GB")), Ok(()));
        assert_eq!(check("015555555", Some("US")), Err(BAD_FORMAT.to_string()));
    }

    #[test]
    fn test_phone_international_prefix() {
        assert_eq!(check("+86 138 0013 8000", None), Ok(()));
        assert_eq!(check("+1 415 555 2671", Some("CN")), Ok(()));
        assert_eq!(check("+44 7911 123456", Some("US")), Ok(()));
        assert_eq!(check("+999123", None), Err(BAD_REGION.to_string()));
    }

    #[test]
    fn test_phone_unknown_region() {
        assert_eq!(check("13800138000", Some("ZZ")), Err(BAD_REGION.to_string()));
        assert_eq!(phone(&[Datum::str("1"), Datum::Int(1)]), Err(BAD_REGION.to_string()));
    }
}
