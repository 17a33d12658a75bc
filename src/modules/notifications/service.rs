use tracing::{debug, info, instrument};

use k12_core::AppError;
use k12_models::{NotificationKind, PushMessage};
use k12_store::DocumentStore;

use crate::modules::session::SessionReader;
use crate::modules::users::UserService;

pub struct NotificationService;

impl NotificationService {
    /// Classifies an inbound push by its `type` data entry.
    #[instrument(skip(message))]
    pub fn dispatch(message: &PushMessage) -> NotificationKind {
        let kind = message.kind();
        info!(
            notification.kind = kind.as_str(),
            notification.title = message.display_title(),
            "Push notification received"
        );
        kind
    }

    /// Stores `token` on the signed-in user's profile.
    ///
    /// Returns `false` without touching the store when nobody is signed in.
    #[instrument(skip(store, session, token))]
    pub async fn register_device_token<S: DocumentStore>(
        store: &S,
        session: &SessionReader,
        token: &str,
    ) -> Result<bool, AppError> {
        let Some(user) = session.current() else {
            debug!("No signed-in user, device token ignored");
            return Ok(false);
        };

        UserService::update_device_token(store, &user.uid, token).await?;
        Ok(true)
    }
}
