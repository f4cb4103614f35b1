use crate::EngineError;

/// ISO currency code a trip is planned in.
///
/// The currency is informative only: the engine never converts between
/// currencies, and a trip's total cost is the raw sum of its children's
/// amounts whatever currency they were paid in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
    Chf,
    Pln,
    Jpy,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
            Currency::Pln => "PLN",
            Currency::Jpy => "JPY",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "GBP" => Ok(Currency::Gbp),
            "CHF" => Ok(Currency::Chf),
            "PLN" => Ok(Currency::Pln),
            "JPY" => Ok(Currency::Jpy),
            other => Err(EngineError::InvalidArgument(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::try_from("eur").unwrap(), Currency::Eur);
        assert_eq!(Currency::try_from(" USD ").unwrap(), Currency::Usd);
        assert!(Currency::try_from("XYZ").is_err());
    }
}
