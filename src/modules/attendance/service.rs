use tracing::instrument;

use k12_core::AppError;
use k12_models::attendance::fields;
use k12_models::{Attendance, AttendanceId, AttendanceStatus, Document, Student, StudentId, UserId};
use k12_store::{Direction, DocumentStore};

use crate::batch::{BatchReport, BatchWriter};
use crate::modules::repository;

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip(store, record), fields(attendance.student = %record.student_id))]
    pub async fn add_attendance<S: DocumentStore>(
        store: &S,
        record: Attendance,
    ) -> Result<AttendanceId, AppError> {
        repository::create(store, record).await
    }

    /// Submits a whole register. Each record is written once; a failed
    /// record is reported and does not hold back the others.
    #[instrument(skip_all, fields(records = records.len()))]
    pub async fn submit_attendance<S: DocumentStore>(
        store: &S,
        batch: &BatchWriter,
        records: Vec<Attendance>,
    ) -> BatchReport<AttendanceId> {
        batch
            .run(records, |record| Self::add_attendance(store, record))
            .await
    }

    /// One record per student for `date`, all marked by `marked_by`.
    pub fn register_for(
        students: &[Student],
        date: chrono::NaiveDate,
        marked_by: &UserId,
        status_of: impl Fn(&Student) -> AttendanceStatus,
    ) -> Vec<Attendance> {
        students
            .iter()
            .map(|student| {
                Attendance::for_student(student, date, status_of(student), marked_by.clone())
            })
            .collect()
    }

    /// Newest first.
    #[instrument(skip(store))]
    pub async fn get_attendance_by_student<S: DocumentStore>(
        store: &S,
        student_id: &StudentId,
    ) -> Result<Vec<Attendance>, AppError> {
        repository::fetch(
            store
                .collection(Attendance::COLLECTION)
                .where_eq(fields::STUDENT_ID, student_id.as_str())
                .order_by(fields::CREATED_AT, Direction::Descending),
        )
        .await
    }

    /// Newest first.
    #[instrument(skip(store))]
    pub async fn get_attendance_by_class<S: DocumentStore>(
        store: &S,
        class_name: &str,
    ) -> Result<Vec<Attendance>, AppError> {
        repository::fetch(
            store
                .collection(Attendance::COLLECTION)
                .where_eq(fields::CLASS_NAME, class_name)
                .order_by(fields::CREATED_AT, Direction::Descending),
        )
        .await
    }
}
