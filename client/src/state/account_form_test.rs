use super::*;
use crate::net::api::ApiError;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn filled_account() -> AccountDraft {
    AccountDraft {
        name: " Иванов Иван ".to_owned(),
        gender: "male".to_owned(),
        birthday: "1985-03-14".to_owned(),
        phone: "+7 (999) 123 45-67".to_owned(),
        email: "doc@example.com".to_owned(),
        password: "secret1".to_owned(),
        speciality_id: "spec-1".to_owned(),
    }
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_requires_valid_email_and_password() {
    let errors = LoginDraft { email: "nope".to_owned(), password: String::new() }.to_request().unwrap_err();
    assert!(errors.get(Field::Email).is_some());
    assert_eq!(errors.get(Field::Password), Some("Введите пароль"));
}

#[test]
fn login_trims_email() {
    let request = LoginDraft { email: " a@b.ru ".to_owned(), password: "pw".to_owned() }.to_request().unwrap();
    assert_eq!(request.email, "a@b.ru");
    assert_eq!(request.password, "pw");
}

#[test]
fn login_failure_message_depends_on_status() {
    assert_eq!(login_failure_message(&ApiError::BadRequest(String::new())), "Неправильный логин или пароль");
    assert_eq!(
        login_failure_message(&ApiError::Transport("offline".to_owned())),
        "Не удалось выполнить вход, попробуйте позже"
    );
}

// =============================================================
// Registration and profile
// =============================================================

#[test]
fn register_request_carries_every_field() {
    let request = filled_account().to_register_request(today()).unwrap();
    assert_eq!(request.name, "Иванов Иван");
    assert_eq!(request.gender, Gender::Male);
    assert_eq!(request.birthday, "1985-03-14T00:00:00.000Z");
    assert_eq!(request.speciality, "spec-1");
}

#[test]
fn register_reports_password_and_speciality() {
    let draft = AccountDraft { password: "abcdef".to_owned(), speciality_id: String::new(), ..filled_account() };
    let errors = draft.to_register_request(today()).unwrap_err();
    assert_eq!(errors.get(Field::Password), Some("Пароль должен содержать хотя бы одну цифру"));
    assert_eq!(errors.get(Field::Speciality), Some("Выберите специальность"));
    assert_eq!(errors.get(Field::Name), None);
}

#[test]
fn profile_update_ignores_password_and_speciality() {
    let draft = AccountDraft { password: String::new(), speciality_id: String::new(), ..filled_account() };
    let update = draft.to_profile_update(today()).unwrap();
    assert_eq!(update.phone, "+7 (999) 123 45-67");
}

#[test]
fn birthday_in_future_or_before_1900_is_rejected() {
    let future = AccountDraft { birthday: "2030-01-01".to_owned(), ..filled_account() };
    assert_eq!(
        future.to_profile_update(today()).unwrap_err().get(Field::Birthday),
        Some("Дата рождения не может быть в будущем")
    );
    let ancient = AccountDraft { birthday: "1850-01-01".to_owned(), ..filled_account() };
    assert!(ancient.to_profile_update(today()).unwrap_err().get(Field::Birthday).is_some());
}

#[test]
fn from_doctor_prefills_inputs() {
    let doctor = Doctor {
        name: "Ann".to_owned(),
        gender: Gender::Female,
        birthday: Some("1990-05-17T00:00:00".to_owned()),
        email: "ann@example.com".to_owned(),
        phone: None,
        ..Doctor::default()
    };
    let draft = AccountDraft::from_doctor(&doctor);
    assert_eq!(draft.gender, "Female");
    assert_eq!(draft.birthday, "1990-05-17");
    assert_eq!(draft.phone, "");
}

#[test]
fn register_failure_message_distinguishes_conflict() {
    assert_eq!(
        register_failure_message(&ApiError::Conflict(String::new())),
        "Пользователь с таким email уже зарегистрирован"
    );
}

// =============================================================
// Patient registration
// =============================================================

#[test]
fn patient_payload_requires_all_fields() {
    let errors = PatientDraft::default().to_payload(today()).unwrap_err();
    assert_eq!(errors.get(Field::Name), Some("Введите ФИО"));
    assert_eq!(errors.get(Field::Gender), Some("Выберите пол"));
    assert_eq!(errors.get(Field::Birthday), Some("Выберите дату рождения"));
}

#[test]
fn patient_payload_from_valid_draft() {
    let draft = PatientDraft {
        name: "Петров Пётр".to_owned(),
        gender: "Female".to_owned(),
        birthday: "2000-12-31".to_owned(),
    };
    let payload = draft.to_payload(today()).unwrap();
    assert_eq!(payload.gender, Gender::Female);
    assert_eq!(payload.birthday, "2000-12-31T00:00:00.000Z");
}
