use tracing::instrument;

use k12_core::AppError;
use k12_models::students::fields;
use k12_models::{Document, Student, StudentId, UserId};
use k12_store::{Direction, DocumentStore};

use crate::batch::{BatchReport, BatchWriter};
use crate::modules::repository;

pub struct StudentService;

impl StudentService {
    #[instrument(skip(store, student), fields(student.class = %student.class_name))]
    pub async fn add_student<S: DocumentStore>(
        store: &S,
        student: Student,
    ) -> Result<StudentId, AppError> {
        repository::create(store, student).await
    }

    /// Creates every student through the batch writer.
    #[instrument(skip_all, fields(students = students.len()))]
    pub async fn add_students<S: DocumentStore>(
        store: &S,
        batch: &BatchWriter,
        students: Vec<Student>,
    ) -> BatchReport<StudentId> {
        batch
            .run(students, |student| Self::add_student(store, student))
            .await
    }

    #[instrument(skip(store))]
    pub async fn get_student<S: DocumentStore>(
        store: &S,
        id: &StudentId,
    ) -> Result<Student, AppError> {
        repository::get_by_id(store, id).await
    }

    #[instrument(skip(store))]
    pub async fn get_students_by_parent<S: DocumentStore>(
        store: &S,
        parent_id: &UserId,
    ) -> Result<Vec<Student>, AppError> {
        repository::fetch(
            store
                .collection(Student::COLLECTION)
                .where_eq(fields::PARENT_ID, parent_id.as_str()),
        )
        .await
    }

    /// Students of `class_name` in roll-number order (compared as text).
    #[instrument(skip(store))]
    pub async fn get_students_by_class<S: DocumentStore>(
        store: &S,
        class_name: &str,
    ) -> Result<Vec<Student>, AppError> {
        repository::fetch(
            store
                .collection(Student::COLLECTION)
                .where_eq(fields::CLASS_NAME, class_name)
                .order_by(fields::ROLL_NUMBER, Direction::Ascending),
        )
        .await
    }
}
