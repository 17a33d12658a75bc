use tracing::instrument;

use k12_core::AppError;
use k12_models::homework::fields;
use k12_models::{Document, Homework, HomeworkId};
use k12_store::{Direction, DocumentStore};

use crate::modules::repository;

pub struct HomeworkService;

impl HomeworkService {
    #[instrument(skip(store, homework), fields(homework.class = %homework.class_name))]
    pub async fn add_homework<S: DocumentStore>(
        store: &S,
        homework: Homework,
    ) -> Result<HomeworkId, AppError> {
        repository::create(store, homework).await
    }

    /// Newest first.
    #[instrument(skip(store))]
    pub async fn get_homework_by_class<S: DocumentStore>(
        store: &S,
        class_name: &str,
    ) -> Result<Vec<Homework>, AppError> {
        repository::fetch(
            store
                .collection(Homework::COLLECTION)
                .where_eq(fields::CLASS_NAME, class_name)
                .order_by(fields::CREATED_AT, Direction::Descending),
        )
        .await
    }
}
