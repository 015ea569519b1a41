use super::*;

// =============================================================
// Email
// =============================================================

#[test]
fn email_accepts_plain_addresses() {
    assert!(is_valid_email("doctor@clinic.ru"));
    assert!(is_valid_email("a.b+c@mail.example.com"));
}

#[test]
fn email_rejects_missing_parts_and_whitespace() {
    assert!(!is_valid_email("doctor"));
    assert!(!is_valid_email("@clinic.ru"));
    assert!(!is_valid_email("doctor@clinic"));
    assert!(!is_valid_email("doctor@.ru"));
    assert!(!is_valid_email("doc tor@clinic.ru"));
    assert!(!is_valid_email("a@b@c.ru"));
}

#[test]
fn email_error_distinguishes_empty_from_invalid() {
    assert_eq!(email_error(" "), Some("Введите email"));
    assert_eq!(email_error("x@"), Some("Некорректный email"));
    assert_eq!(email_error("x@y.z"), None);
}

// =============================================================
// Phone
// =============================================================

#[test]
fn phone_accepts_common_formats() {
    assert!(is_valid_phone("+7 (999) 123 45-67"));
    assert!(is_valid_phone("+79991234567"));
    assert!(is_valid_phone("+7(999)1234567"));
    assert!(is_valid_phone("+7 999 123 45 67"));
    assert!(is_valid_phone("+12"));
}

#[test]
fn phone_rejects_malformed_numbers() {
    assert!(!is_valid_phone("89991234567"));
    assert!(!is_valid_phone("+"));
    assert!(!is_valid_phone("+7"));
    assert!(!is_valid_phone("+ 7 999"));
    assert!(!is_valid_phone("+7 (99999) 123"));
    assert!(!is_valid_phone("+7 (999 123"));
    assert!(!is_valid_phone("+7 999-123-45"));
    assert!(!is_valid_phone("+7 abc"));
}

#[test]
fn phone_rejects_too_many_groups() {
    assert!(!is_valid_phone("+7 1 2 3 4 5 6"));
    assert!(is_valid_phone("+7 1 2 3 4 5"));
}

// =============================================================
// Password
// =============================================================

#[test]
fn password_requires_length_then_digit() {
    assert_eq!(password_error("a1"), Some("Пароль должен содержать не менее 6 символов"));
    assert_eq!(password_error("abcdef"), Some("Пароль должен содержать хотя бы одну цифру"));
    assert_eq!(password_error("abcde1"), None);
}

#[test]
fn required_error_trims() {
    assert_eq!(required_error("  ", "x"), Some("x"));
    assert_eq!(required_error("a", "x"), None);
}
