use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::{UserReader, UserWriter};
use crate::domain::auth::Session;
use crate::domain::user::UserProfile;
use crate::dto::profile::ProfilePageData;
use crate::forms::flatten_errors;
use crate::forms::profile::UpdateProfileForm;
use crate::services::{ServiceError, ServiceResult};

/// Loads the signed-in user's profile page.
pub fn load_profile_page<A>(api: &A, session: &mut Session) -> ServiceResult<ProfilePageData>
where
    A: UserReader + ?Sized,
{
    let user = fetch_current_user(api, session)?;
    Ok(ProfilePageData { user })
}

/// Prefills the profile edit form with the account data on record.
pub fn load_profile_form<A>(api: &A, session: &mut Session) -> ServiceResult<UpdateProfileForm>
where
    A: UserReader + ?Sized,
{
    let user = fetch_current_user(api, session)?;
    Ok(UpdateProfileForm::from(&user))
}

/// Validates and submits profile changes, returning the updated profile.
pub fn update_profile<A>(
    api: &A,
    session: &mut Session,
    form: UpdateProfileForm,
) -> ServiceResult<ProfilePageData>
where
    A: UserWriter + ?Sized,
{
    if let Err(errors) = form.validate() {
        log::error!("Failed to validate profile form: {errors}");
        return Err(ServiceError::Form(flatten_errors(&errors)));
    }

    let Some(token) = session.token() else {
        return Err(ServiceError::Unauthorized);
    };

    match api.update_user(token, &form.into_update_user()) {
        Ok(user) => Ok(ProfilePageData { user }),
        Err(ApiError::Unauthorized) => {
            session.sign_out();
            Err(ServiceError::Unauthorized)
        }
        Err(ApiError::InvalidInput(body)) => {
            log::error!("Profile update rejected: {body}");
            Err(ServiceError::Form("Helytelen bevitt adat".to_string()))
        }
        Err(err) => {
            log::error!("Failed to update profile: {err}");
            Err(ServiceError::Form(
                "Nem sikerült módosítani az adatokat".to_string(),
            ))
        }
    }
}

fn fetch_current_user<A>(api: &A, session: &mut Session) -> ServiceResult<UserProfile>
where
    A: UserReader + ?Sized,
{
    let Some(token) = session.token() else {
        return Err(ServiceError::Unauthorized);
    };

    match api.get_current_user(token) {
        Ok(user) => Ok(user),
        Err(ApiError::Unauthorized) => {
            session.sign_out();
            Err(ServiceError::Unauthorized)
        }
        Err(err) => {
            log::error!("Failed to load user profile: {err}");
            Err(err.into())
        }
    }
}
