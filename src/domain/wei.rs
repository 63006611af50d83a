use crate::error::RegistryError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places between wei and ether.
pub const ETHER_DECIMALS: u32 = 18;
/// Number of decimal places between wei and gwei.
pub const GWEI_DECIMALS: u32 = 9;

/// An amount of value in wei, the smallest unit.
///
/// Arithmetic is checked: callers decide what an overflow or underflow means
/// in their context instead of the value silently wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Wei(u128);

impl Wei {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Converts a whole or fractional number of ether into wei.
    pub fn from_ether(ether: Decimal) -> Result<Self, RegistryError> {
        Self::from_decimal(ether, ETHER_DECIMALS)
    }

    /// Scales `value` units of `10^decimals` wei into wei.
    ///
    /// `Decimal` only splits the whole and fractional parts; the whole part is
    /// scaled in `u128`, so anything that fits a `u128` in wei is accepted.
    fn from_decimal(value: Decimal, decimals: u32) -> Result<Self, RegistryError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(RegistryError::ValidationError(format!(
                "Amount must not be negative: {}",
                value
            )));
        }
        let whole = value.trunc().to_u128().ok_or_else(|| {
            RegistryError::ValidationError(format!("Amount out of range: {}", value))
        })?;
        // fract() < 1, so this stays below 10^decimals.
        let fraction = value
            .fract()
            .checked_mul(Decimal::from(10u64.pow(decimals)))
            .filter(|wei| wei.fract().is_zero())
            .and_then(|wei| wei.to_u128())
            .ok_or_else(|| {
                RegistryError::ValidationError(format!(
                    "Amount {} is not a whole number of wei",
                    value
                ))
            })?;
        Self::scale(whole, fraction, decimals)
            .ok_or_else(|| RegistryError::ValidationError(format!("Amount too large: {}", value)))
    }

    fn scale(whole: u128, fraction: u128, decimals: u32) -> Option<Self> {
        whole
            .checked_mul(10u128.pow(decimals))?
            .checked_add(fraction)
            .map(Self)
    }

    /// The amount expressed in ether, if it fits a `Decimal`.
    pub fn to_ether(&self) -> Option<Decimal> {
        let mantissa = i128::try_from(self.0).ok()?;
        Decimal::try_from_i128_with_scale(mantissa, ETHER_DECIMALS).ok()
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl From<u128> for Wei {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl FromStr for Wei {
    type Err = RegistryError;

    /// Parses `1000`, `1000 wei`, `5 gwei`, `1 ether` or `0.25ether`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<u128>() {
            return Ok(Self(value));
        }

        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (number, unit) = s.split_at(split);
        let decimals = match unit.trim().to_ascii_lowercase().as_str() {
            "" | "wei" => 0,
            "gwei" => GWEI_DECIMALS,
            "ether" | "eth" => ETHER_DECIMALS,
            other => {
                return Err(RegistryError::ValidationError(format!(
                    "Unknown unit '{}' in amount '{}'",
                    other, s
                )));
            }
        };
        let number = number.trim();
        // Whole numbers skip `Decimal`, whose range is narrower than `u128`.
        if let Ok(whole) = number.parse::<u128>() {
            return Self::scale(whole, 0, decimals).ok_or_else(|| {
                RegistryError::ValidationError(format!("Amount too large: {}", s))
            });
        }
        let value = Decimal::from_str(number).map_err(|e| {
            RegistryError::ValidationError(format!("Invalid amount '{}': {}", s, e))
        })?;
        Self::from_decimal(value, decimals)
    }
}

impl TryFrom<String> for Wei {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Wei> for String {
    fn from(wei: Wei) -> Self {
        wei.to_string()
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_parse_plain_wei() {
        assert_eq!("1000".parse::<Wei>().unwrap(), Wei::new(1000));
        assert_eq!("1000 wei".parse::<Wei>().unwrap(), Wei::new(1000));
        assert_eq!(" 0 ".parse::<Wei>().unwrap(), Wei::ZERO);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("1 ether".parse::<Wei>().unwrap(), Wei::new(ONE_ETHER));
        assert_eq!("0.5ether".parse::<Wei>().unwrap(), Wei::new(ONE_ETHER / 2));
        assert_eq!("2 gwei".parse::<Wei>().unwrap(), Wei::new(2_000_000_000));
    }

    #[test]
    fn test_parse_rejects_invalid_amounts() {
        assert!(matches!(
            "-1 ether".parse::<Wei>(),
            Err(RegistryError::ValidationError(_))
        ));
        assert!(matches!(
            "1.5 wei".parse::<Wei>(),
            Err(RegistryError::ValidationError(_))
        ));
        assert!(matches!(
            "3 dogecoin".parse::<Wei>(),
            Err(RegistryError::ValidationError(_))
        ));
        assert!(matches!(
            "lots".parse::<Wei>(),
            Err(RegistryError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_large_unit_amounts() {
        assert_eq!(
            "100000000000 ether".parse::<Wei>().unwrap(),
            Wei::new(100_000_000_000 * ONE_ETHER)
        );
        assert_eq!(
            "100000000000.5 ether".parse::<Wei>().unwrap(),
            Wei::new(100_000_000_000 * ONE_ETHER + ONE_ETHER / 2)
        );
        // Beyond Decimal's range but still a u128 once in wei.
        assert_eq!(
            "100000000000000000000000000000 gwei".parse::<Wei>().unwrap(),
            Wei::new(100_000_000_000_000_000_000_000_000_000 * 1_000_000_000)
        );
        assert_eq!(
            Wei::from_ether(dec!(100000000000)).unwrap(),
            Wei::new(100_000_000_000 * ONE_ETHER)
        );
    }

    #[test]
    fn test_parse_rejects_u128_overflow() {
        assert!(matches!(
            "1000000000000000000000 ether".parse::<Wei>(),
            Err(RegistryError::ValidationError(_))
        ));
        assert!(matches!(
            "340282366920938463463374607431768211456".parse::<Wei>(),
            Err(RegistryError::ValidationError(_))
        ));
    }

    #[test]
    fn test_ether_conversion() {
        let wei = Wei::from_ether(dec!(1.25)).unwrap();
        assert_eq!(wei, Wei::new(ONE_ETHER + ONE_ETHER / 4));
        assert_eq!(wei.to_ether(), Some(dec!(1.25)));
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(Wei::new(2).checked_add(Wei::new(3)), Some(Wei::new(5)));
        assert_eq!(Wei::new(2).checked_sub(Wei::new(3)), None);
        assert_eq!(Wei::new(u128::MAX).checked_add(Wei::new(1)), None);
    }

    #[test]
    fn test_serializes_as_integer_string() {
        let json = serde_json::to_string(&Wei::new(ONE_ETHER)).unwrap();
        assert_eq!(json, "\"1000000000000000000\"");
        let back: Wei = serde_json::from_str("\"1 ether\"").unwrap();
        assert_eq!(back, Wei::new(ONE_ETHER));
    }
}
