//! Brazilian document masks for CPF, CEP and phone numbers.
//!
//! Each formatter strips everything but digits, caps the digit count and
//! applies its mask progressively, so partial input yields a partial mask
//! (`"12345"` formats as `"123.45"`).

use once_cell::sync::Lazy;
use regex::Regex;

const CPF_DIGITS: usize = 11;
const CEP_DIGITS: usize = 8;
const PHONE_DIGITS: usize = 11;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("static regex"));
static CPF_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{3})(\d)").expect("static regex"));
static CPF_CHECK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{3})(\d{1,2})$").expect("static regex"));
static CEP_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{5})(\d)").expect("static regex"));
static PHONE_AREA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{2})(\d)").expect("static regex"));
static PHONE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4,5})(\d{4})$").expect("static regex"));

/// Keep only ASCII digits.
pub fn digits_only(value: &str) -> String {
    NON_DIGIT.replace_all(value, "").into_owned()
}

fn capped_digits(value: &str, max: usize) -> String {
    let mut digits = digits_only(value);
    digits.truncate(max);
    digits
}

/// `###.###.###-##`
pub fn format_cpf(value: &str) -> String {
    let digits = capped_digits(value, CPF_DIGITS);
    let masked = CPF_GROUP.replace(&digits, "$1.$2").into_owned();
    let masked = CPF_GROUP.replace(&masked, "$1.$2").into_owned();
    CPF_CHECK.replace(&masked, "$1-$2").into_owned()
}

/// `#####-###`
pub fn format_cep(value: &str) -> String {
    let digits = capped_digits(value, CEP_DIGITS);
    CEP_SPLIT.replace(&digits, "$1-$2").into_owned()
}

/// `(##) #####-####` for mobile numbers, `(##) ####-####` for landlines.
pub fn format_phone(value: &str) -> String {
    let digits = capped_digits(value, PHONE_DIGITS);
    let masked = PHONE_AREA.replace(&digits, "($1) $2").into_owned();
    PHONE_SPLIT.replace(&masked, "$1-$2").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_full_mask() {
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
        assert_eq!(format_cpf("123.456.789-01"), "123.456.789-01");
    }

    #[test]
    fn test_cpf_partial_and_overflow() {
        assert_eq!(format_cpf("123"), "123");
        assert_eq!(format_cpf("12345"), "123.45");
        assert_eq!(format_cpf("1234567"), "123.456.7");
        assert_eq!(format_cpf("123456789012345"), "123.456.789-01");
    }

    #[test]
    fn test_cep_mask() {
        assert_eq!(format_cep("01310100"), "01310-100");
        assert_eq!(format_cep("01310-100"), "01310-100");
        assert_eq!(format_cep("0131"), "0131");
        assert_eq!(format_cep("013101"), "01310-1");
    }

    #[test]
    fn test_phone_mask() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("1187654321"), "(11) 8765-4321");
        assert_eq!(format_phone("(11) 98765-4321"), "(11) 98765-4321");
        assert_eq!(format_phone("119"), "(11) 9");
        assert_eq!(format_phone("1"), "1");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("a1-b2 c3"), "123");
        assert_eq!(digits_only(""), "");
    }
}
