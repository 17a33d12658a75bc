use tracing::instrument;

use k12_core::AppError;
use k12_models::fees::fields;
use k12_models::{Document, Fee, FeeId, StudentId};
use k12_store::{Direction, DocumentStore};

use crate::modules::repository;

pub struct FeeService;

impl FeeService {
    #[instrument(skip(store, fee), fields(fee.student = %fee.student_id))]
    pub async fn add_fee<S: DocumentStore>(store: &S, fee: Fee) -> Result<FeeId, AppError> {
        repository::create(store, fee).await
    }

    /// Newest first.
    #[instrument(skip(store))]
    pub async fn get_fees_by_student<S: DocumentStore>(
        store: &S,
        student_id: &StudentId,
    ) -> Result<Vec<Fee>, AppError> {
        repository::fetch(
            store
                .collection(Fee::COLLECTION)
                .where_eq(fields::STUDENT_ID, student_id.as_str())
                .order_by(fields::CREATED_AT, Direction::Descending),
        )
        .await
    }
}
