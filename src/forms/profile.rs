use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::user::{Address, UpdateUser, UserProfile};
use crate::forms::validation_error;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for editing the signed-in user's account details.
///
/// Unlike registration, the phone number only has to start with `+` and
/// the tax number messages differ. These rules match the edit screen,
/// which is looser than the sign-up screen.
pub struct UpdateProfileForm {
    /// Given name.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub last_name: String,
    /// Delivery address, all fields required.
    #[validate(nested)]
    pub shipping_address: ShippingAddressUpdate,
    /// Invoicing address, tax number optional.
    #[validate(nested)]
    pub billing_address: BillingAddressUpdate,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Shipping address block of the profile edit form.
pub struct ShippingAddressUpdate {
    /// Recipient name.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub name: String,
    /// Country.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub country: String,
    /// City.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub city: String,
    /// Street and house number.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub street: String,
    /// Postal code.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub zip: String,
    /// Contact phone number, must start with `+`.
    #[validate(custom(function = validate_phone_prefix))]
    pub phone_number: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Billing address block of the profile edit form.
pub struct BillingAddressUpdate {
    /// Invoice name.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub name: String,
    /// Country.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub country: String,
    /// City.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub city: String,
    /// Street and house number.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub street: String,
    /// Postal code.
    #[validate(length(min = 1, message = "A mező kitöltése kötelező"))]
    pub zip: String,
    /// Company tax number, eleven digits when present.
    #[serde(default)]
    #[validate(custom(function = validate_tax_number_update))]
    pub tax_number: Option<String>,
}

impl From<&UserProfile> for UpdateProfileForm {
    /// Prefill the edit form with the account data currently on record.
    fn from(user: &UserProfile) -> Self {
        let shipping = user.shipping_address.clone().unwrap_or_default();
        let billing = user.billing_address.clone().unwrap_or_default();

        UpdateProfileForm {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            shipping_address: ShippingAddressUpdate {
                name: shipping.name,
                country: shipping.country,
                city: shipping.city,
                street: shipping.street,
                zip: shipping.zip,
                phone_number: shipping.phone_number.unwrap_or_default(),
            },
            billing_address: BillingAddressUpdate {
                name: billing.name,
                country: billing.country,
                city: billing.city,
                street: billing.street,
                zip: billing.zip,
                tax_number: billing.tax_number,
            },
        }
    }
}

impl UpdateProfileForm {
    /// Builds the update payload. A cleared tax number is dropped instead
    /// of being sent as an empty string.
    #[must_use]
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            first_name: self.first_name,
            last_name: self.last_name,
            shipping_address: Address {
                name: self.shipping_address.name,
                country: self.shipping_address.country,
                city: self.shipping_address.city,
                street: self.shipping_address.street,
                zip: self.shipping_address.zip,
                phone_number: Some(self.shipping_address.phone_number),
                tax_number: None,
            },
            billing_address: Address {
                name: self.billing_address.name,
                country: self.billing_address.country,
                city: self.billing_address.city,
                street: self.billing_address.street,
                zip: self.billing_address.zip,
                phone_number: None,
                tax_number: self.billing_address.tax_number.filter(|tax| !tax.is_empty()),
            },
        }
    }
}

/// The edit screen only insists on the leading `+`.
fn validate_phone_prefix(value: &str) -> Result<(), ValidationError> {
    if value.starts_with('+') {
        Ok(())
    } else {
        Err(validation_error(
            "phone_prefix",
            "A telefonszámnak '+' jellel kell kezdődnie",
        ))
    }
}

/// A cleared field passes; anything entered must be exactly eleven digits.
fn validate_tax_number_update(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() != 11 {
        return Err(validation_error(
            "tax_number_length",
            "Az adószámnak 11 számjegyűnek kell lennie.",
        ));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(validation_error(
            "tax_number_digits",
            "Az adószámnak csak számokat lehet tartalmaznia.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            email: "vevo@example.com".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Kiss".to_string(),
            shipping_address: Some(Address {
                name: "Kiss Anna".to_string(),
                country: "Hungary".to_string(),
                city: "Budapest".to_string(),
                street: "Fő utca 1.".to_string(),
                zip: "1011".to_string(),
                phone_number: Some("+36301234567".to_string()),
                tax_number: None,
            }),
            billing_address: Some(Address {
                name: "Kiss Anna".to_string(),
                country: "Hungary".to_string(),
                city: "Budapest".to_string(),
                street: "Fő utca 1.".to_string(),
                zip: "1011".to_string(),
                phone_number: None,
                tax_number: Some("12345678901".to_string()),
            }),
        }
    }

    /// Prefill copies names, addresses and the stored tax number.
    #[test]
    fn prefill_from_profile() {
        let form = UpdateProfileForm::from(&profile());

        assert_eq!(form.first_name, "Anna");
        assert_eq!(form.shipping_address.phone_number, "+36301234567");
        assert_eq!(
            form.billing_address.tax_number.as_deref(),
            Some("12345678901")
        );
        assert!(form.validate().is_ok());
    }

    /// Prefill of a profile without addresses yields empty blocks.
    #[test]
    fn prefill_without_addresses() {
        let mut user = profile();
        user.shipping_address = None;
        user.billing_address = None;

        let form = UpdateProfileForm::from(&user);

        assert_eq!(form.shipping_address.phone_number, "");
        assert!(form.validate().is_err());
    }

    /// The edit screen accepts any phone starting with `+`.
    #[test]
    fn phone_only_needs_plus_prefix() {
        let mut form = UpdateProfileForm::from(&profile());
        form.shipping_address.phone_number = "+1".to_string();
        assert!(form.validate().is_ok());

        form.shipping_address.phone_number = "36301234567".to_string();
        assert!(form.validate().is_err());
    }

    /// Tax number must be eleven digits when present, length checked first.
    #[test]
    fn tax_number_rules() {
        let mut form = UpdateProfileForm::from(&profile());

        form.billing_address.tax_number = Some("123".to_string());
        let errors = form.validate().unwrap_err();
        let text = crate::forms::flatten_errors(&errors);
        assert!(text.contains("Az adószámnak 11 számjegyűnek kell lennie."));

        form.billing_address.tax_number = Some("1234567890a".to_string());
        let errors = form.validate().unwrap_err();
        let text = crate::forms::flatten_errors(&errors);
        assert!(text.contains("Az adószámnak csak számokat lehet tartalmaznia."));

        form.billing_address.tax_number = Some(String::new());
        assert!(form.validate().is_ok());
    }

    /// The payload keeps entered values and drops a cleared tax number.
    #[test]
    fn into_update_user_normalizes() {
        let mut form = UpdateProfileForm::from(&profile());
        form.billing_address.tax_number = Some(String::new());

        let update = form.into_update_user();

        assert_eq!(update.billing_address.tax_number, None);
        assert_eq!(
            update.shipping_address.phone_number.as_deref(),
            Some("+36301234567")
        );
        assert_eq!(update.billing_address.phone_number, None);
    }
}
