//! Bootstrap of the first administrator account.

use crate::auth::password::hash_password;
use folio_core::models::{NewUser, User};
use folio_core::AppError;
use folio_db::UserStore;

/// Create the admin user unless one with this username already exists.
///
/// Returns `None` when the account was already there; the stored password is
/// left untouched in that case.
pub async fn ensure_admin(
    users: &dyn UserStore,
    username: &str,
    password: &str,
    email: Option<String>,
) -> Result<Option<User>, AppError> {
    if password.len() < 8 {
        return Err(AppError::ValidationFailed(
            "Admin password must be at least 8 characters".to_string(),
        ));
    }

    if users.get_user_by_username(username).await?.is_some() {
        tracing::info!(username = %username, "Admin user already exists");
        return Ok(None);
    }

    let user = users
        .create_user(NewUser {
            username: username.to_string(),
            email,
            password_hash: hash_password(password).await?,
            first_name: None,
            last_name: None,
        })
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Admin user created");
    Ok(Some(user))
}
