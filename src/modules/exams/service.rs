use tracing::instrument;

use k12_core::AppError;
use k12_models::exams::fields;
use k12_models::{Document, Exam, ExamId};
use k12_store::{Direction, DocumentStore};

use crate::modules::repository;

pub struct ExamService;

impl ExamService {
    #[instrument(skip(store, exam), fields(exam.class = %exam.class_name))]
    pub async fn add_exam<S: DocumentStore>(store: &S, exam: Exam) -> Result<ExamId, AppError> {
        repository::create(store, exam).await
    }

    #[instrument(skip(store))]
    pub async fn get_exams_by_class<S: DocumentStore>(
        store: &S,
        class_name: &str,
    ) -> Result<Vec<Exam>, AppError> {
        repository::fetch(
            store
                .collection(Exam::COLLECTION)
                .where_eq(fields::CLASS_NAME, class_name)
                .order_by(fields::CREATED_AT, Direction::Descending),
        )
        .await
    }
}
