use serde::Deserialize;
use serde::Serialize;

pub const MAX_NAME_CHARS: usize = 100;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("name must not be blank")]
    Blank,
    #[error("name too long, at most {max} characters allowed len={len}", max = MAX_NAME_CHARS)]
    TooLong { len: usize },
}

/// Named owner of an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, parse_display::Display)]
#[serde(try_from = "String")]
pub struct Holder(String);

impl Holder {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Holder {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_name(&value)?;
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Holder {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_owned())
    }
}

/// Name of a bank, unique within a [`crate::ledger::Ledger`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, parse_display::Display)]
#[serde(try_from = "String")]
pub struct BankName(String);

impl BankName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BankName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_name(&value)?;
        Ok(Self(value))
    }
}

impl TryFrom<&str> for BankName {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_owned())
    }
}

fn validate_name(value: &str) -> Result<(), NameError> {
    if value.trim().is_empty() {
        return Err(NameError::Blank);
    }
    let len = value.chars().count();
    if len > MAX_NAME_CHARS {
        return Err(NameError::TooLong { len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert2::let_assert;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Martín")]
    #[case("Liz Gonzales")]
    fn holder_accepts_valid_names(#[case] name: &str) {
        let_assert!(Ok(holder) = Holder::try_from(name));
        assert_eq!(holder.as_str(), name);
    }

    #[rstest]
    #[case("", NameError::Blank)]
    #[case("   ", NameError::Blank)]
    fn holder_rejects_invalid_names(#[case] name: &str, #[case] expected: NameError) {
        let_assert!(Err(error) = Holder::try_from(name));
        assert_eq!(error, expected);
    }

    #[test]
    fn holder_length_is_counted_in_chars_not_bytes() {
        let at_limit = "ñ".repeat(MAX_NAME_CHARS);
        let_assert!(Ok(_) = Holder::try_from(at_limit.as_str()));

        let over_limit = "a".repeat(MAX_NAME_CHARS + 1);
        let_assert!(Err(error) = Holder::try_from(over_limit));
        assert_eq!(error, NameError::TooLong { len: MAX_NAME_CHARS + 1 });
    }

    #[test]
    fn bank_name_rejects_blank_name() {
        let_assert!(Err(NameError::Blank) = BankName::try_from("\t"));
    }

    #[test]
    fn bank_name_displays_inner_value() {
        let_assert!(Ok(name) = BankName::try_from("Banco BBVA"));
        assert_eq!(name.to_string(), "Banco BBVA");
    }
}
