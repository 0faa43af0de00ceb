use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::{Authenticator, UserReader, UserWriter};
use crate::domain::auth::Session;
use crate::domain::user::Credentials;
use crate::forms::auth::{LoginForm, RegistrationForm};
use crate::forms::flatten_errors;
use crate::services::{ServiceError, ServiceResult};

/// Validates the credentials and signs the session in.
///
/// Any rejection by the API, including transport failures, is reported
/// with the same inline text so the screen does not leak whether the
/// account exists.
pub fn login<A>(api: &A, session: &mut Session, form: &LoginForm) -> ServiceResult<()>
where
    A: Authenticator + ?Sized,
{
    if let Err(errors) = form.validate() {
        log::error!("Failed to validate login form: {errors}");
        // The email check runs first on the login screen.
        let message = if errors.field_errors().contains_key("username") {
            "Hibás e-mail formátum"
        } else {
            "A jelszónak legalább 8 karakter hosszúnak kell lennie, és tartalmaznia kell betűket és számokat"
        };
        return Err(ServiceError::Form(message.to_string()));
    }

    let token = api.login(&Credentials::from(form)).map_err(|err| {
        log::error!("Login failed: {err}");
        ServiceError::Form("Hibás felhasználónév vagy jelszó, próbálja meg újra".to_string())
    })?;

    session.sign_in(token);
    Ok(())
}

/// Ends the session. The token is dropped even when the API call fails,
/// so a broken connection can never leave the client signed in.
pub fn logout<A>(api: &A, session: &mut Session) -> ServiceResult<()>
where
    A: Authenticator + ?Sized,
{
    if let Some(token) = session.token()
        && let Err(err) = api.logout(token)
    {
        log::error!("Logout request failed: {err}");
    }

    session.sign_out();
    Ok(())
}

/// Validates the registration form and creates the account.
pub fn register<A>(api: &A, form: RegistrationForm) -> ServiceResult<()>
where
    A: UserWriter + ?Sized,
{
    if let Err(errors) = form.validate() {
        log::error!("Failed to validate registration form: {errors}");
        return Err(ServiceError::Form(flatten_errors(&errors)));
    }

    api.register_user(&form.into_new_user()).map_err(|err| {
        log::error!("Registration failed: {err}");
        match err {
            ApiError::InvalidInput(_) => {
                ServiceError::Form("A bevitt adatok érvénytelenek".to_string())
            }
            ApiError::Conflict(_) => {
                ServiceError::Conflict("A felhasználó már létezik".to_string())
            }
            ApiError::Transport(_) => ServiceError::Form(
                "Váratlan hiba történt. Kérjük, próbálja újra később.".to_string(),
            ),
            other => ServiceError::from(other),
        }
    })?;

    Ok(())
}

/// Checks the session token against the API.
///
/// A rejected or unreachable check signs the session out and reports
/// `Unauthorized`; an unexpected server response leaves the token in
/// place and treats the session as still valid.
pub fn validate_session<A>(api: &A, session: &mut Session) -> ServiceResult<()>
where
    A: UserReader + ?Sized,
{
    let Some(token) = session.token() else {
        return Err(ServiceError::Unauthorized);
    };

    match api.get_current_user(token) {
        Ok(_) => Ok(()),
        Err(ApiError::Unauthorized) => {
            session.sign_out();
            Err(ServiceError::Unauthorized)
        }
        Err(err @ (ApiError::Transport(_) | ApiError::Decode(_))) => {
            log::error!("Session validation failed: {err}");
            session.sign_out();
            Err(ServiceError::Unauthorized)
        }
        Err(err) => {
            log::warn!("Session validation inconclusive: {err}");
            Ok(())
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::domain::auth::AccessToken;
    use crate::domain::user::{Address, UserProfile};
    use crate::forms::auth::{BillingAddressForm, ShippingAddressForm};

    fn token() -> AccessToken {
        AccessToken::new("t-123").expect("valid token")
    }

    fn login_form() -> LoginForm {
        LoginForm {
            username: "vevo@example.com".to_string(),
            password: "jelszo123".to_string(),
        }
    }

    fn registration_form() -> RegistrationForm {
        RegistrationForm {
            username: "vevo@example.com".to_string(),
            password: "jelszo123".to_string(),
            password_confirm: "jelszo123".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Kiss".to_string(),
            shipping_address: ShippingAddressForm {
                name: "Kiss Anna".to_string(),
                country: "Hungary".to_string(),
                city: "Budapest".to_string(),
                street: "Fő utca 1.".to_string(),
                zip: "1011".to_string(),
                phone_number: "+36301234567".to_string(),
            },
            billing_address: BillingAddressForm {
                name: "Kiss Anna".to_string(),
                country: "Hungary".to_string(),
                city: "Budapest".to_string(),
                street: "Fő utca 1.".to_string(),
                zip: "1011".to_string(),
                tax_number: None,
            },
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            email: "vevo@example.com".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Kiss".to_string(),
            shipping_address: Some(Address::default()),
            billing_address: None,
        }
    }

    /// A successful login stores the token in the session.
    #[test]
    fn login_signs_session_in() {
        let mut api = MockApi::new();
        api.expect_login()
            .withf(|credentials| {
                credentials.username == "vevo@example.com" && credentials.password == "jelszo123"
            })
            .times(1)
            .returning(|_| Ok(token()));
        let mut session = Session::anonymous();

        login(&api, &mut session, &login_form()).expect("should log in");

        assert!(session.is_authenticated());
    }

    /// A malformed email never reaches the API.
    #[test]
    fn login_rejects_bad_email() {
        let mut api = MockApi::new();
        api.expect_login().times(0);
        let mut session = Session::anonymous();
        let form = LoginForm {
            username: "vevo@example".to_string(),
            ..login_form()
        };

        let result = login(&api, &mut session, &form);

        assert!(matches!(result, Err(ServiceError::Form(message)) if message == "Hibás e-mail formátum"));
        assert!(!session.is_authenticated());
    }

    /// A weak password gets the password text, not the email text.
    #[test]
    fn login_rejects_weak_password() {
        let mut api = MockApi::new();
        api.expect_login().times(0);
        let mut session = Session::anonymous();
        let form = LoginForm {
            password: "rovid1".to_string(),
            ..login_form()
        };

        let result = login(&api, &mut session, &form);

        assert!(
            matches!(result, Err(ServiceError::Form(message)) if message.starts_with("A jelszónak"))
        );
    }

    /// Rejected credentials and transport failures share one message.
    #[test]
    fn login_maps_api_failures_to_inline_text() {
        for err in [
            ApiError::Unauthorized,
            ApiError::Transport("connection refused".to_string()),
        ] {
            let mut api = MockApi::new();
            api.expect_login().times(1).return_once(|_| Err(err));
            let mut session = Session::anonymous();

            let result = login(&api, &mut session, &login_form());

            assert!(matches!(
                result,
                Err(ServiceError::Form(message))
                    if message == "Hibás felhasználónév vagy jelszó, próbálja meg újra"
            ));
            assert!(!session.is_authenticated());
        }
    }

    /// Logout clears the session even when the API call fails.
    #[test]
    fn logout_clears_session_on_failure() {
        let mut api = MockApi::new();
        api.expect_logout()
            .times(1)
            .returning(|_| Err(ApiError::Transport("timeout".to_string())));
        let mut session = Session::with_token(token());

        logout(&api, &mut session).expect("logout should succeed");

        assert!(!session.is_authenticated());
    }

    /// An anonymous logout skips the API entirely.
    #[test]
    fn logout_without_token_skips_api() {
        let mut api = MockApi::new();
        api.expect_logout().times(0);
        let mut session = Session::anonymous();

        logout(&api, &mut session).expect("logout should succeed");

        assert!(!session.is_authenticated());
    }

    /// A valid form is sent as the registration payload.
    #[test]
    fn register_sends_payload() {
        let mut api = MockApi::new();
        api.expect_register_user()
            .withf(|user| {
                user.username == "vevo@example.com"
                    && user.shipping_address.phone_number.as_deref() == Some("+36301234567")
            })
            .times(1)
            .returning(|_| Ok(()));

        register(&api, registration_form()).expect("should register");
    }

    /// The API's status classes map to the screen's inline texts.
    #[test]
    fn register_maps_status_errors() {
        let cases = [
            (
                ApiError::InvalidInput("bad payload".to_string()),
                "A bevitt adatok érvénytelenek",
            ),
            (
                ApiError::Conflict("duplicate".to_string()),
                "A felhasználó már létezik",
            ),
            (
                ApiError::Transport("connection refused".to_string()),
                "Váratlan hiba történt. Kérjük, próbálja újra később.",
            ),
        ];

        for (err, expected) in cases {
            let mut api = MockApi::new();
            api.expect_register_user().times(1).return_once(|_| Err(err));

            let result = register(&api, registration_form());

            match result {
                Err(ServiceError::Form(message) | ServiceError::Conflict(message)) => {
                    assert_eq!(message, expected);
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    /// An invalid form never reaches the API and reports field texts.
    #[test]
    fn register_rejects_invalid_form() {
        let mut api = MockApi::new();
        api.expect_register_user().times(0);
        let mut form = registration_form();
        form.password_confirm = "mas-jelszo1".to_string();

        let result = register(&api, form);

        assert!(
            matches!(result, Err(ServiceError::Form(message)) if message.contains("Nem egyezik a jelszó"))
        );
    }

    /// A missing token is unauthorized without touching the API.
    #[test]
    fn validate_session_requires_token() {
        let mut api = MockApi::new();
        api.expect_get_current_user().times(0);
        let mut session = Session::anonymous();

        let result = validate_session(&api, &mut session);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    /// A rejected token is cleared from the session.
    #[test]
    fn validate_session_clears_rejected_token() {
        let mut api = MockApi::new();
        api.expect_get_current_user()
            .times(1)
            .returning(|_| Err(ApiError::Unauthorized));
        let mut session = Session::with_token(token());

        let result = validate_session(&api, &mut session);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
        assert!(!session.is_authenticated());
    }

    /// An unreachable API also clears the token.
    #[test]
    fn validate_session_clears_token_on_transport_failure() {
        let mut api = MockApi::new();
        api.expect_get_current_user()
            .times(1)
            .returning(|_| Err(ApiError::Transport("connection refused".to_string())));
        let mut session = Session::with_token(token());

        let result = validate_session(&api, &mut session);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
        assert!(!session.is_authenticated());
    }

    /// A server-side error leaves the session untouched.
    #[test]
    fn validate_session_keeps_token_on_server_error() {
        let mut api = MockApi::new();
        api.expect_get_current_user()
            .times(1)
            .returning(|_| Err(ApiError::Unexpected("status 500: boom".to_string())));
        let mut session = Session::with_token(token());

        validate_session(&api, &mut session).expect("session should stay valid");

        assert!(session.is_authenticated());
    }

    /// A confirmed token keeps the session signed in.
    #[test]
    fn validate_session_accepts_valid_token() {
        let mut api = MockApi::new();
        api.expect_get_current_user()
            .withf(|token| token.as_str() == "t-123")
            .times(1)
            .returning(|_| Ok(profile()));
        let mut session = Session::with_token(token());

        validate_session(&api, &mut session).expect("session should stay valid");

        assert!(session.is_authenticated());
    }
}
