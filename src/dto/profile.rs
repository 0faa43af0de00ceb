//! DTOs for the account pages.

use crate::domain::user::UserProfile;

/// Data required to render the signed-in user's profile view.
#[derive(Debug)]
pub struct ProfilePageData {
    pub user: UserProfile,
}
