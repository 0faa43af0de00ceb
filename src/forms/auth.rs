use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::user::{Address, Credentials, NewUser};
use crate::forms::validation_error;

#[derive(Clone, Debug, Deserialize, Validate)]
/// Form data for signing in to an existing account.
pub struct LoginForm {
    /// Account email address.
    #[validate(custom(function = validate_login_email))]
    pub username: String,
    /// Account password.
    #[validate(custom(function = validate_login_password))]
    pub password: String,
}

impl From<&LoginForm> for Credentials {
    /// Convert the [`LoginForm`] into the credentials payload sent on login.
    fn from(form: &LoginForm) -> Self {
        Credentials {
            username: form.username.clone(),
            password: form.password.clone(),
        }
    }
}

/// Accepts `local@domain.tld` shapes: no whitespace, exactly one `@` and
/// a dot inside the domain part.
fn validate_login_email(value: &str) -> Result<(), ValidationError> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
                && domain
                    .match_indices('.')
                    .any(|(at, _)| at > 0 && at + 1 < domain.len())
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(validation_error("email_format", "Hibás e-mail formátum"))
    }
}

/// At least eight characters, letters and digits only, with at least one
/// letter and one digit.
fn validate_login_password(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() >= 8
        && value.chars().all(|c| c.is_ascii_alphanumeric())
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(validation_error(
            "password_format",
            "A jelszónak legalább 8 karakter hosszúnak kell lennie, és tartalmaznia kell betűket és számokat",
        ))
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for creating a new account.
pub struct RegistrationForm {
    /// Email address used as the account name.
    #[validate(email(message = "Helytelen felhasználónév"))]
    pub username: String,
    /// Password, at least eight characters with a lowercase letter and a digit.
    #[validate(
        length(min = 8, message = "Jelszó minimum 8 karakter hosszú lehet"),
        custom(function = validate_registration_password)
    )]
    pub password: String,
    /// Must repeat the password exactly.
    #[validate(must_match(other = password, message = "Nem egyezik a jelszó"))]
    pub password_confirm: String,
    /// Given name.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub last_name: String,
    /// Delivery address, all fields required.
    #[validate(nested)]
    pub shipping_address: ShippingAddressForm,
    /// Invoicing address, tax number optional.
    #[validate(nested)]
    pub billing_address: BillingAddressForm,
}

impl RegistrationForm {
    /// Mirrors the "billing same as shipping" checkbox: copies the
    /// shipping fields over the billing address and drops any tax number
    /// entered before.
    pub fn use_shipping_as_billing(&mut self) {
        self.billing_address = BillingAddressForm {
            name: self.shipping_address.name.clone(),
            country: self.shipping_address.country.clone(),
            city: self.shipping_address.city.clone(),
            street: self.shipping_address.street.clone(),
            zip: self.shipping_address.zip.clone(),
            tax_number: None,
        };
    }

    /// Builds the registration payload. A cleared tax number is dropped
    /// instead of being sent as an empty string.
    #[must_use]
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            username: self.username,
            password: self.password,
            password_confirm: self.password_confirm,
            first_name: self.first_name,
            last_name: self.last_name,
            shipping_address: self.shipping_address.into_address(),
            billing_address: self.billing_address.into_address(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Shipping address block of the registration form.
pub struct ShippingAddressForm {
    /// Recipient name.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub name: String,
    /// Country.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub country: String,
    /// City.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub city: String,
    /// Street and house number.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub street: String,
    /// Postal code.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub zip: String,
    /// Contact phone number in international format.
    #[validate(custom(function = validate_international_phone))]
    pub phone_number: String,
}

impl ShippingAddressForm {
    fn into_address(self) -> Address {
        Address {
            name: self.name,
            country: self.country,
            city: self.city,
            street: self.street,
            zip: self.zip,
            phone_number: Some(self.phone_number),
            tax_number: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Billing address block of the registration form.
pub struct BillingAddressForm {
    /// Invoice name.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub name: String,
    /// Country.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub country: String,
    /// City.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub city: String,
    /// Street and house number.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub street: String,
    /// Postal code.
    #[validate(length(min = 1, message = "Kötelező mező"))]
    pub zip: String,
    /// Company tax number, eleven digits when present.
    #[serde(default)]
    #[validate(custom(function = validate_registration_tax_number))]
    pub tax_number: Option<String>,
}

impl BillingAddressForm {
    fn into_address(self) -> Address {
        Address {
            name: self.name,
            country: self.country,
            city: self.city,
            street: self.street,
            zip: self.zip,
            phone_number: None,
            tax_number: self.tax_number.filter(|tax| !tax.is_empty()),
        }
    }
}

/// `+` followed by 10 to 14 digits.
fn validate_international_phone(value: &str) -> Result<(), ValidationError> {
    let valid = value
        .strip_prefix('+')
        .is_some_and(|digits| (10..=14).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()));

    if valid {
        Ok(())
    } else {
        Err(validation_error(
            "phone_format",
            "Érvénytelen telefonszám, használja a +.. formátumot",
        ))
    }
}

/// The length rule reports too-short passwords; this adds the lowercase
/// and digit requirements.
fn validate_registration_password(value: &str) -> Result<(), ValidationError> {
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(validation_error(
            "password_lowercase",
            "Jelszó tartalmaznia kell egy kisbetűt",
        ));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(validation_error(
            "password_digit",
            "Jelszó tartalmaznia kell egy számot",
        ));
    }
    Ok(())
}

/// A cleared field passes; anything entered must be digits only and
/// exactly eleven of them.
fn validate_registration_tax_number(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(validation_error("tax_number_digits", "Csak számot tartalmazzon"));
    }
    if value.len() != 11 {
        return Err(validation_error(
            "tax_number_length",
            "Az adószámnak 11 karakternek kell lennie",
        ));
    }
    Ok(())
}
