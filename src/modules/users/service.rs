use tracing::{info, instrument};

use k12_core::AppError;
use k12_models::{User, UserId};
use k12_store::DocumentStore;

use crate::modules::repository;

pub struct UserService;

impl UserService {
    /// Writes the profile at `users/{uid}`; the id comes from the auth provider.
    #[instrument(skip(store, user), fields(user.id = %user.id, user.role = %user.role))]
    pub async fn create_profile<S: DocumentStore>(store: &S, user: &User) -> Result<(), AppError> {
        repository::put(store, user).await?;
        info!("User profile saved");
        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn get_user<S: DocumentStore>(store: &S, id: &UserId) -> Result<User, AppError> {
        repository::get_by_id(store, id).await
    }

    /// Records the push token on the profile, replacing any earlier one.
    #[instrument(skip(store, token))]
    pub async fn update_device_token<S: DocumentStore>(
        store: &S,
        id: &UserId,
        token: &str,
    ) -> Result<User, AppError> {
        let user = Self::get_user(store, id).await?;
        if user.device_token.as_deref() == Some(token) {
            return Ok(user);
        }

        let user = User {
            device_token: Some(token.to_string()),
            ..user
        };
        repository::put(store, &user).await?;
        info!("Device token updated");

        Ok(user)
    }
}
