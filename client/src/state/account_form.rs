//! Drafts behind the login, registration, profile and patient forms.
//!
//! Each draft holds raw input values as typed by the user and turns them
//! into a request body, or into per-field messages when something is off.

#[cfg(test)]
#[path = "account_form_test.rs"]
mod account_form_test;

use chrono::{Datelike, NaiveDate};

use crate::net::types::{Doctor, Gender, LoginRequest, PatientCreate, ProfileUpdate, RegisterRequest};
use crate::util::datetime::{iso_to_date_input, to_iso};
use crate::util::validation::{email_error, password_error, phone_error, required_error};

/// Earliest accepted birth year.
pub const MIN_BIRTH_YEAR: i32 = 1900;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Gender,
    Birthday,
    Phone,
    Speciality,
    Email,
    Password,
}

/// Messages keyed by field, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(Field, &'static str)>);

impl FieldErrors {
    fn check(&mut self, field: Field, message: Option<&'static str>) {
        if let Some(message) = message {
            self.0.push((field, message));
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| *m)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, Self> {
        if !self.is_empty() {
            return Err(self);
        }
        value().ok_or(self)
    }
}

fn parse_birthday(input: &str, today: NaiveDate) -> Result<NaiveDate, &'static str> {
    if input.trim().is_empty() {
        return Err("Выберите дату рождения");
    }
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| "Некорректная дата рождения")?;
    if date > today {
        return Err("Дата рождения не может быть в будущем");
    }
    if date.year() < MIN_BIRTH_YEAR {
        return Err("Некорректная дата рождения");
    }
    Ok(date)
}

fn birthday_iso(date: NaiveDate) -> Option<String> {
    date.and_hms_opt(0, 0, 0).map(|naive| to_iso(naive.and_utc()))
}

fn gender_error(raw: &str) -> Option<&'static str> {
    if Gender::parse(raw).is_some() { None } else { Some("Выберите пол") }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    /// # Errors
    ///
    /// Blank or malformed email, blank password.
    pub fn to_request(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.check(Field::Email, email_error(&self.email));
        errors.check(Field::Password, required_error(&self.password, "Введите пароль"));
        errors.into_result(|| {
            Some(LoginRequest { email: self.email.trim().to_owned(), password: self.password.clone() })
        })
    }
}

/// Doctor fields shared by registration and profile editing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountDraft {
    pub name: String,
    /// Raw select value, parsed with [`Gender::parse`].
    pub gender: String,
    /// `YYYY-MM-DD` from a date input.
    pub birthday: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub speciality_id: String,
}

impl AccountDraft {
    #[must_use]
    pub fn from_doctor(doctor: &Doctor) -> Self {
        Self {
            name: doctor.name.clone(),
            gender: doctor.gender.as_str().to_owned(),
            birthday: doctor.birthday.as_deref().map(iso_to_date_input).unwrap_or_default(),
            phone: doctor.phone.clone().unwrap_or_default(),
            email: doctor.email.clone(),
            ..Self::default()
        }
    }

    fn profile_errors(&self, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::default();
        errors.check(Field::Name, required_error(&self.name, "Введите имя"));
        errors.check(Field::Gender, gender_error(&self.gender));
        errors.check(Field::Birthday, parse_birthday(&self.birthday, today).err());
        errors.check(Field::Phone, phone_error(&self.phone));
        errors.check(Field::Email, email_error(&self.email));
        errors
    }

    fn birthday_value(&self, today: NaiveDate) -> Option<String> {
        parse_birthday(&self.birthday, today).ok().and_then(birthday_iso)
    }

    /// # Errors
    ///
    /// Per-field messages for every invalid input.
    pub fn to_profile_update(&self, today: NaiveDate) -> Result<ProfileUpdate, FieldErrors> {
        self.profile_errors(today).into_result(|| {
            Some(ProfileUpdate {
                email: self.email.trim().to_owned(),
                name: self.name.trim().to_owned(),
                birthday: self.birthday_value(today)?,
                gender: Gender::parse(&self.gender)?,
                phone: self.phone.trim().to_owned(),
            })
        })
    }

    /// # Errors
    ///
    /// Per-field messages for every invalid input, including the password
    /// and speciality.
    pub fn to_register_request(&self, today: NaiveDate) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = self.profile_errors(today);
        errors.check(Field::Speciality, required_error(&self.speciality_id, "Выберите специальность"));
        errors.check(Field::Password, password_error(&self.password));
        errors.into_result(|| {
            Some(RegisterRequest {
                name: self.name.trim().to_owned(),
                password: self.password.clone(),
                email: self.email.trim().to_owned(),
                birthday: self.birthday_value(today)?,
                gender: Gender::parse(&self.gender)?,
                phone: self.phone.trim().to_owned(),
                speciality: self.speciality_id.clone(),
            })
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
    pub gender: String,
    pub birthday: String,
}

impl PatientDraft {
    /// # Errors
    ///
    /// Missing name or gender, missing or out-of-range birthday.
    pub fn to_payload(&self, today: NaiveDate) -> Result<PatientCreate, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.check(Field::Name, required_error(&self.name, "Введите ФИО"));
        errors.check(Field::Gender, gender_error(&self.gender));
        let birthday = parse_birthday(&self.birthday, today);
        errors.check(Field::Birthday, birthday.err());
        errors.into_result(|| {
            Some(PatientCreate {
                name: self.name.trim().to_owned(),
                birthday: birthday_iso(birthday.ok()?)?,
                gender: Gender::parse(&self.gender)?,
            })
        })
    }
}

/// Localized message for a failed login.
#[must_use]
pub fn login_failure_message(err: &crate::net::api::ApiError) -> &'static str {
    match err.status() {
        Some(400 | 401 | 404) => "Неправильный логин или пароль",
        _ => "Не удалось выполнить вход, попробуйте позже",
    }
}

/// Localized message for a failed registration.
#[must_use]
pub fn register_failure_message(err: &crate::net::api::ApiError) -> &'static str {
    match err.status() {
        Some(409) => "Пользователь с таким email уже зарегистрирован",
        Some(400) => "Проверьте правильность заполнения полей",
        _ => "Не удалось зарегистрироваться, попробуйте позже",
    }
}
