//! Password criteria shared by local validation and the signup service's
//! `422` error codes.

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 10;
/// Maximum password length, counted in characters.
pub const MAX_PASSWORD_LENGTH: usize = 24;

/// One password rule. Variants are declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    TooShort,
    TooLong,
    Whitespace,
    MissingDigit,
    MissingUppercase,
    MissingLowercase,
}

impl Criterion {
    pub const ALL: [Self; 6] = [
        Self::TooShort,
        Self::TooLong,
        Self::Whitespace,
        Self::MissingDigit,
        Self::MissingUppercase,
        Self::MissingLowercase,
    ];

    /// User-facing message shown when the rule fails.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::TooShort => "Password must be at least 10 characters long",
            Self::TooLong => "Password must be at most 24 characters long",
            Self::Whitespace => "Password cannot contain spaces",
            Self::MissingDigit => "Password must contain at least one number",
            Self::MissingUppercase => "Password must contain at least one uppercase letter",
            Self::MissingLowercase => "Password must contain at least one lowercase letter",
        }
    }

    /// Error code the signup service uses for the same rule.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::Whitespace => "no_whitespace",
            Self::MissingDigit => "missing_digits",
            Self::MissingUppercase => "missing_uppercase",
            Self::MissingLowercase => "missing_lowercase",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|criterion| criterion.code() == code)
    }

    /// Returns true if `password` breaks this rule.
    #[must_use]
    pub fn is_violated_by(self, password: &str) -> bool {
        match self {
            Self::TooShort => password.chars().count() < MIN_PASSWORD_LENGTH,
            Self::TooLong => password.chars().count() > MAX_PASSWORD_LENGTH,
            Self::Whitespace => password.chars().any(is_space),
            Self::MissingDigit => !password.chars().any(|c| c.is_ascii_digit()),
            Self::MissingUppercase => !password.chars().any(|c| c.is_ascii_uppercase()),
            Self::MissingLowercase => !password.chars().any(|c| c.is_ascii_lowercase()),
        }
    }
}

/// Unicode whitespace plus the zero width no-break space (U+FEFF).
fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Every rule `password` breaks, in evaluation order.
#[must_use]
pub fn violations(password: &str) -> Vec<Criterion> {
    Criterion::ALL
        .into_iter()
        .filter(|criterion| criterion.is_violated_by(password))
        .collect()
}

/// Messages for every rule `password` breaks, in evaluation order. Empty
/// means the password is acceptable.
#[must_use]
pub fn validate(password: &str) -> Vec<String> {
    violations(password)
        .into_iter()
        .map(|criterion| criterion.message().to_string())
        .collect()
}

#[must_use]
pub fn is_valid(password: &str) -> bool {
    Criterion::ALL
        .into_iter()
        .all(|criterion| !criterion.is_violated_by(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_passwords_have_no_violations() {
        for password in [
            "Abcdefghi1",
            "Password1234",
            "aB3aB3aB3aB3aB3aB3aB3aB3",
            "Zz9-!@#$%^&*()",
        ] {
            assert!(validate(password).is_empty(), "{password} should be valid");
            assert!(is_valid(password));
        }
    }

    #[test]
    fn short_password_reports_only_min_length() {
        let errors = validate("short1A");
        assert!(errors.contains(&Criterion::TooShort.message().to_string()));
        assert!(!errors.contains(&Criterion::TooLong.message().to_string()));
        assert_eq!(violations("short1A"), vec![Criterion::TooShort]);
    }

    #[test]
    fn long_password_reports_max_length() {
        let password = "Abcdefghij1234567890ABCDE";
        assert_eq!(password.len(), 25);
        assert_eq!(violations(password), vec![Criterion::TooLong]);
    }

    #[test]
    fn missing_digit() {
        let errors = validate("NoDigitsHere");
        assert_eq!(errors, vec![Criterion::MissingDigit.message().to_string()]);
    }

    #[test]
    fn missing_uppercase() {
        let errors = validate("alllowercase1");
        assert_eq!(
            errors,
            vec!["Password must contain at least one uppercase letter".to_string()]
        );
    }

    #[test]
    fn missing_lowercase() {
        let errors = validate("ALLUPPERCASE1");
        assert_eq!(
            errors,
            vec!["Password must contain at least one lowercase letter".to_string()]
        );
    }

    #[test]
    fn whitespace_is_reported_regardless_of_other_rules() {
        assert_eq!(violations("Abcdef 123"), vec![Criterion::Whitespace]);
        assert!(violations("a b").contains(&Criterion::Whitespace));
        assert!(violations("Abcdef\t1234").contains(&Criterion::Whitespace));
    }

    #[test]
    fn empty_password_accumulates_in_order() {
        assert_eq!(
            violations(""),
            vec![
                Criterion::TooShort,
                Criterion::MissingDigit,
                Criterion::MissingUppercase,
                Criterion::MissingLowercase,
            ]
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 10 characters, 13 bytes
        let password = "Äbcdefgh1é";
        assert_eq!(password.chars().count(), 10);
        assert!(!Criterion::TooShort.is_violated_by(password));
    }

    #[test]
    fn byte_order_mark_counts_as_whitespace() {
        assert_eq!(violations("Abcdefgh1\u{FEFF}x"), vec![Criterion::Whitespace]);
        assert_eq!(violations("Abcdefgh1\u{00A0}x"), vec![Criterion::Whitespace]);
    }

    #[test]
    fn codes_round_trip() {
        for criterion in Criterion::ALL {
            assert_eq!(Criterion::from_code(criterion.code()), Some(criterion));
        }
        assert_eq!(Criterion::from_code("not_allowed"), None);
        assert_eq!(Criterion::from_code("TOO_SHORT"), None);
    }
}
