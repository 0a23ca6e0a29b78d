// ── Form validation ──
//
// Field checks run on every edit (advisory error slots) and the gating
// checks that must pass before login or registration hits the network.

use std::sync::LazyLock;

use regex::Regex;

use crate::messages;
use crate::state::RegisterState;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

pub fn full_name(value: &str) -> Option<&'static str> {
    value.trim().is_empty().then_some(messages::NAME_BLANK)
}

pub fn email(value: &str) -> Option<&'static str> {
    (!EMAIL_PATTERN.is_match(value.trim())).then_some(messages::EMAIL_INVALID)
}

pub fn password(value: &str) -> Option<&'static str> {
    (value.chars().count() < MIN_PASSWORD_LEN).then_some(messages::PASSWORD_TOO_SHORT)
}

pub fn confirm_password(password: &str, confirm: &str) -> Option<&'static str> {
    (password != confirm).then_some(messages::PASSWORDS_DIFFER)
}

/// Gate for `login()`: both fields must be non-blank.
pub fn login(email: &str, password: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() || password.trim().is_empty() {
        Err(messages::FILL_ALL_FIELDS)
    } else {
        Ok(())
    }
}

/// Gate for `register()`: required fields non-blank, passwords equal.
///
/// Format and length problems only show up in the field error slots;
/// the server has the final word on those.
pub fn registration(state: &RegisterState) -> Result<(), &'static str> {
    if state.full_name.trim().is_empty()
        || state.email.trim().is_empty()
        || state.password.trim().is_empty()
    {
        return Err(messages::FILL_REQUIRED_FIELDS);
    }
    if state.password != state.confirm_password {
        return Err(messages::PASSWORDS_DIFFER);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert_eq!(email("ana@example.com"), None);
        assert_eq!(email("ana.perez+pets@duoc.cl"), None);
        assert_eq!(email("ana@"), Some(messages::EMAIL_INVALID));
        assert_eq!(email("ana example.com"), Some(messages::EMAIL_INVALID));
        assert_eq!(email(""), Some(messages::EMAIL_INVALID));
    }

    #[test]
    fn password_length_counts_chars() {
        assert_eq!(password("ñandú1"), None);
        assert_eq!(password("abc"), Some(messages::PASSWORD_TOO_SHORT));
    }

    #[test]
    fn blank_name() {
        assert_eq!(full_name("   "), Some(messages::NAME_BLANK));
        assert_eq!(full_name("Ana"), None);
    }

    #[test]
    fn login_gate() {
        assert_eq!(login("", ""), Err(messages::FILL_ALL_FIELDS));
        assert_eq!(login("a@b.cl", " "), Err(messages::FILL_ALL_FIELDS));
        assert_eq!(login("a@b.cl", "x"), Ok(()));
    }

    #[test]
    fn registration_gate() {
        let mut state = RegisterState {
            full_name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "secreto1".into(),
            confirm_password: "secreto2".into(),
            ..RegisterState::default()
        };
        assert_eq!(registration(&state), Err(messages::PASSWORDS_DIFFER));

        state.confirm_password = "secreto1".into();
        assert_eq!(registration(&state), Ok(()));

        state.full_name.clear();
        assert_eq!(registration(&state), Err(messages::FILL_REQUIRED_FIELDS));
    }
}
