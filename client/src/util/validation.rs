//! Field validators for the account forms.
//!
//! Hand-written matchers; each returns the localized message shown under the
//! field, or `None` when the value is acceptable.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

pub const MIN_PASSWORD_LEN: usize = 6;

/// `local@domain.tld` with no whitespace and a single `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Maximum digits in one phone group.
const PHONE_GROUP_DIGITS: usize = 4;
/// Maximum number of groups after the country code.
const PHONE_MAX_GROUPS: usize = 5;

/// `+<country digits>` followed by one to five groups of up to four digits,
/// each optionally in parentheses and optionally space-separated, with an
/// optional `-NN` tail.
///
/// Accepts `+7 (999) 123 45-67`, `+7(999)1234567` and `+79991234567`.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let Some(body) = phone.trim().strip_prefix('+') else {
        return false;
    };
    let body = match body.split_once('-') {
        Some((head, tail)) => {
            let tail = tail.trim_start();
            if tail.len() != 2 || !tail.chars().all(|c| c.is_ascii_digit()) {
                return false;
            }
            head.trim_end()
        }
        None => body,
    };
    if !body.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }

    // Each digit run may be cut into groups anywhere; the first run also
    // feeds the country code, so it may contribute zero groups.
    let (mut min_groups, mut max_groups) = (0usize, 0usize);
    let mut first_run = true;
    let mut chars = body.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' {
            chars.next();
            let mut digits = 0;
            while chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
                digits += 1;
            }
            if chars.next() != Some(')') || digits == 0 || digits > PHONE_GROUP_DIGITS {
                return false;
            }
            min_groups += 1;
            max_groups += 1;
            first_run = false;
        } else if c.is_ascii_digit() {
            let mut digits = 0;
            while chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
                digits += 1;
            }
            if first_run {
                max_groups += digits - 1;
                first_run = false;
            } else {
                min_groups += digits.div_ceil(PHONE_GROUP_DIGITS);
                max_groups += digits;
            }
        } else {
            return false;
        }
    }
    min_groups <= PHONE_MAX_GROUPS && max_groups >= 1
}

#[must_use]
pub fn email_error(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Введите email")
    } else if !is_valid_email(email.trim()) {
        Some("Некорректный email")
    } else {
        None
    }
}

#[must_use]
pub fn phone_error(phone: &str) -> Option<&'static str> {
    if phone.trim().is_empty() {
        Some("Введите номер телефона")
    } else if !is_valid_phone(phone) {
        Some("Номер телефона должен быть в формате +7 (xxx) xxx xx-xx")
    } else {
        None
    }
}

/// At least [`MIN_PASSWORD_LEN`] characters including a digit.
#[must_use]
pub fn password_error(password: &str) -> Option<&'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Пароль должен содержать не менее 6 символов")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Пароль должен содержать хотя бы одну цифру")
    } else {
        None
    }
}

#[must_use]
pub fn required_error(value: &str, message: &'static str) -> Option<&'static str> {
    if value.trim().is_empty() { Some(message) } else { None }
}
