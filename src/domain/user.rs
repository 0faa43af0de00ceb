use serde::{Deserialize, Serialize};

/// Postal address attached to a user account. Shipping addresses carry a
/// phone number, billing addresses a tax number; the wire omits whichever
/// does not apply.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub name: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub zip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
}

/// Account record returned by `GET /user`. The profile page only renders
/// the name/email triple, so the addresses stay optional.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
}

/// Registration payload posted to `POST /user`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
    pub shipping_address: Address,
    pub billing_address: Address,
}

/// Profile update payload sent to `PUT /user`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub first_name: String,
    pub last_name: String,
    pub shipping_address: Address,
    pub billing_address: Address,
}

/// Login payload for `POST /user/login`. The username is the account's
/// email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
