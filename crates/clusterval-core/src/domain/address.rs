//! Dotted-decimal IPv4 literals.
//!
//! The accepted grammar is deliberately narrower than what most resolvers
//! take: exactly four decimal parts, each in `0..=255`, with no sign, no
//! whitespace and no leading zeros (`"0"` itself is fine, `"01"` is not).

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A syntactically valid IPv4 address, kept in its original spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ipv4Literal(String);

impl Ipv4Literal {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four octets.
    pub fn octets(&self) -> [u8; 4] {
        let mut out = [0u8; 4];
        for (slot, part) in out.iter_mut().zip(self.0.split('.')) {
            // Grammar already checked in `from_str`.
            *slot = part.parse().unwrap_or_default();
        }
        out
    }
}

impl fmt::Display for Ipv4Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ipv4Literal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.matches('.').count() == 3 && s.split('.').all(is_valid_octet) {
            Ok(Self(s.to_owned()))
        } else {
            Err(ValidationError::invalid_argument(format!("Invalid ip {s}.")))
        }
    }
}

fn is_valid_octet(part: &str) -> bool {
    let canonical = part.len() == 1 || !part.starts_with('0');
    !part.is_empty()
        && part.len() <= 3
        && canonical
        && part.bytes().all(|b| b.is_ascii_digit())
        && part.parse::<u16>().is_ok_and(|v| v <= 255)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn accepts(s: &str) -> bool {
        s.parse::<Ipv4Literal>().is_ok()
    }

    #[test]
    fn accepts_well_formed() {
        for ip in [
            "0.0.0.0",
            "127.0.0.1",
            "10.0.0.1",
            "192.168.100.254",
            "255.255.255.255",
            "1.20.200.0",
        ] {
            assert!(accepts(ip), "{ip} should be accepted");
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(!accepts("999.1.1.1"));
        assert!(!accepts("256.0.0.1"));
        assert!(!accepts("1.1.1.1000"));
    }

    #[test]
    fn rejects_leading_zeros_and_signs() {
        assert!(!accepts("01.1.1.1"));
        assert!(!accepts("1.1.1.00"));
        assert!(!accepts("+1.1.1.1"));
        assert!(!accepts("-1.1.1.1"));
        assert!(!accepts(" 1.1.1.1"));
        assert!(!accepts("1.1.1.1 "));
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(!accepts(""));
        assert!(!accepts("1.1.1"));
        assert!(!accepts("1.1.1.1.1"));
        assert!(!accepts("1..1.1"));
        assert!(!accepts("1.1.1."));
        assert!(!accepts("a.b.c.d"));
        assert!(!accepts("1.1.1.1e"));
        assert!(!accepts("localhost"));
    }

    #[test]
    fn rejects_non_ascii_digits() {
        // Arabic-Indic digit one.
        assert!(!accepts("\u{0661}.1.1.1"));
    }

    #[test]
    fn error_names_the_address() {
        let err = "999.1.1.1".parse::<Ipv4Literal>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert!(err.message().contains("999.1.1.1"));
    }

    #[test]
    fn octets_round_out() {
        let ip: Ipv4Literal = "10.20.0.255".parse().unwrap();
        assert_eq!(ip.octets(), [10, 20, 0, 255]);
        assert_eq!(ip.to_string(), "10.20.0.255");
    }
}
