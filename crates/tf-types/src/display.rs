//! Pure display formatting shared by the table and form code.

use alloy_primitives::U256;

/// Shorten a long address for display: first 15 characters, five dots,
/// last 10. Strings of 25 characters or fewer come back unchanged.
pub fn shorten_address(s: &str) -> String {
    const HEAD: usize = 15;
    const TAIL: usize = 10;
    if s.len() <= HEAD + TAIL {
        return s.to_string();
    }
    format!("{}.....{}", &s[..HEAD], &s[s.len() - TAIL..])
}

/// Strip existing separators and whitespace, then re-insert a comma every
/// three digits from the right. Idempotent.
pub fn format_thousands(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if digits.is_empty() {
        return digits;
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Remove separators and whitespace before submitting a supply value.
pub fn strip_separators(raw: &str) -> String {
    raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect()
}

/// Display total supply: raw amount divided by 10^decimals.
///
/// Deliberately f64 division, matching the table's display semantics.
/// Precision is lost for very large supplies or decimals; the raw value is
/// kept alongside on `TokenRecord` for anything that needs exactness.
pub fn display_supply(raw: U256, decimals: u8) -> f64 {
    let raw: f64 = raw.to_string().parse().unwrap_or(f64::NAN);
    raw / 10f64.powi(decimals as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_address_keeps_short_strings() {
        assert_eq!(shorten_address("0xabc"), "0xabc");
        let exactly_25 = "a".repeat(25);
        assert_eq!(shorten_address(&exactly_25), exactly_25);
    }

    #[test]
    fn shorten_address_elides_middle() {
        let addr = "0xb13B6FA320304101ee01b7B3599ae3DA3420bDE3";
        let short = shorten_address(addr);
        assert_eq!(short, "0xb13B6FA320304.....DA3420bDE3");
        assert_eq!(&short[..15], &addr[..15]);
        assert!(short.ends_with(&addr[addr.len() - 10..]));
    }

    #[test]
    fn format_thousands_groups_digits() {
        assert_eq!(format_thousands("1000000"), "1,000,000");
        assert_eq!(format_thousands("1"), "1");
        assert_eq!(format_thousands("12"), "12");
        assert_eq!(format_thousands("123"), "123");
        assert_eq!(format_thousands("1234"), "1,234");
        assert_eq!(format_thousands(""), "");
    }

    #[test]
    fn format_thousands_is_idempotent() {
        assert_eq!(format_thousands("1,000000"), "1,000,000");
        assert_eq!(format_thousands("1,000,000"), "1,000,000");
        let once = format_thousands("987654321");
        assert_eq!(format_thousands(&once), once);
    }

    #[test]
    fn strip_separators_removes_commas_and_spaces() {
        assert_eq!(strip_separators("1,000,000"), "1000000");
        assert_eq!(strip_separators(" 42 "), "42");
    }

    #[test]
    fn display_supply_divides_by_decimals() {
        assert_eq!(display_supply(U256::from(1500u64), 2), 15.0);
        assert_eq!(display_supply(U256::from(1_000_000u64), 0), 1_000_000.0);
    }
}
