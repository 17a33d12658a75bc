use tracing::instrument;

use k12_core::AppError;
use k12_models::notices::fields;
use k12_models::{AUDIENCE_ALL, Document, Notice, NoticeId};
use k12_store::{Direction, DocumentStore};

use crate::modules::repository;

pub struct NoticeService;

impl NoticeService {
    #[instrument(skip(store, notice), fields(notice.audience = %notice.target_audience))]
    pub async fn add_notice<S: DocumentStore>(
        store: &S,
        notice: Notice,
    ) -> Result<NoticeId, AppError> {
        repository::create(store, notice).await
    }

    /// School-wide notices, plus those for `class_name` when one is given.
    /// Newest first.
    #[instrument(skip(store))]
    pub async fn get_notices<S: DocumentStore>(
        store: &S,
        class_name: Option<&str>,
    ) -> Result<Vec<Notice>, AppError> {
        let notices = store.collection(Notice::COLLECTION);

        let query = match class_name.filter(|name| !name.is_empty()) {
            Some(class_name) => {
                notices.where_in(fields::TARGET_AUDIENCE, [AUDIENCE_ALL, class_name])
            }
            None => notices.where_eq(fields::TARGET_AUDIENCE, AUDIENCE_ALL),
        };

        repository::fetch(query.order_by(fields::CREATED_AT, Direction::Descending)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use k12_models::UserId;
    use k12_store::MemoryStore;

    async fn seed(store: &MemoryStore) {
        let teacher = UserId::new("t1");
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

        let notices = [
            Notice::for_all("Holiday", "School closed", teacher.clone(), day),
            Notice::for_class("Trip", "Zoo visit", "Class 2", teacher.clone(), day),
            Notice::for_class("Quiz", "Maths quiz", "Class 3", teacher, day),
        ];
        for (created_at, notice) in notices.into_iter().enumerate() {
            let notice = Notice {
                created_at: created_at as i64,
                ..notice
            };
            NoticeService::add_notice(store, notice).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_without_class_only_school_wide() {
        let store = MemoryStore::new();
        seed(&store).await;

        let titles: Vec<String> = NoticeService::get_notices(&store, None)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["Holiday"]);
    }

    #[tokio::test]
    async fn test_with_class_includes_school_wide_newest_first() {
        let store = MemoryStore::new();
        seed(&store).await;

        let titles: Vec<String> = NoticeService::get_notices(&store, Some("Class 2"))
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["Trip", "Holiday"]);
    }
}
