mod common;

use std::collections::HashMap;

use chrono::NaiveDate;
use common::{PASSWORD, auth_config, generate_unique_email, registration, session_with};
use k12::modules::exams::ExamService;
use k12::modules::fees::FeeService;
use k12::modules::homework::HomeworkService;
use k12::modules::messages::MessageService;
use k12::modules::notifications::NotificationService;
use k12::modules::repository;
use k12::modules::students::StudentService;
use k12::modules::users::UserService;
use k12_core::ErrorKind;
use k12_models::notifications::TYPE_KEY;
use k12_models::{
    Document, Exam, Fee, FeeStatus, Homework, Message, NotificationKind, PushMessage, Student,
    StudentId, UserId, UserRole,
};
use k12_store::{DocumentStore, MemoryStore};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

#[tokio::test]
async fn test_create_embeds_assigned_id() {
    let store = MemoryStore::new();
    let id = StudentService::add_student(&store, Student::new("Aarav Kumar", "Class 1", "1"))
        .await
        .unwrap();

    assert!(!id.is_empty());
    let raw = store
        .collection(Student::COLLECTION)
        .document(id.as_str())
        .get()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw["studentId"], id.as_str());
    assert_eq!(raw["className"], "Class 1");
}

#[tokio::test]
async fn test_invalid_entity_is_never_written() {
    let store = MemoryStore::new();

    let err = StudentService::add_student(&store, Student::new("", "Class 1", "1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let store = MemoryStore::new();

    let err = StudentService::get_student(&store, &StudentId::new("missing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = repository::get_by_id::<_, Student>(&store, &StudentId::empty())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_membership_query_limit() {
    let store = MemoryStore::new();
    let too_many: Vec<String> = (0..31).map(|i| format!("s{}", i)).collect();

    let err = repository::fetch::<_, Student>(
        store
            .collection(Student::COLLECTION)
            .where_in("studentId", too_many),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(store.read_count(), 0);
}

#[tokio::test]
async fn test_one_round_trip_per_operation() {
    let store = MemoryStore::new();

    for roll in 1..=4 {
        let writes = store.write_count();
        let student = Student::new(format!("Student {}", roll), "Class 2", roll.to_string());
        StudentService::add_student(&store, student).await.unwrap();
        assert_eq!(store.write_count(), writes + 1);
    }
    assert_eq!(store.read_count(), 0);

    let class = StudentService::get_students_by_class(&store, "Class 2")
        .await
        .unwrap();
    assert_eq!(class.len(), 4);
    assert_eq!(store.read_count(), 1);

    let (a, b) = (UserId::new("a"), UserId::new("b"));
    for (i, (from, to)) in [(&a, &b), (&b, &a), (&a, &b)].into_iter().enumerate() {
        let message = Message {
            timestamp: i as i64,
            ..Message::new(from.clone(), from.as_str(), to.clone(), to.as_str(), "hi")
        };
        MessageService::send_message(&store, message).await.unwrap();
    }

    let reads = store.read_count();
    let conversation = MessageService::get_conversation(&store, &a, &b).await.unwrap();
    assert_eq!(conversation.len(), 3);
    assert_eq!(store.read_count(), reads + 1);
    assert_eq!(store.write_count(), 7);
}

#[tokio::test]
async fn test_students_by_parent() {
    let store = MemoryStore::new();
    let parent = UserId::new("p1");

    for (name, parent_id) in [("A", "p1"), ("B", "p2"), ("C", "p1")] {
        let student = Student::new(name, "Class 1", "1").with_parent(UserId::new(parent_id));
        StudentService::add_student(&store, student).await.unwrap();
    }

    let children = StudentService::get_students_by_parent(&store, &parent)
        .await
        .unwrap();
    let names: Vec<&str> = children.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[tokio::test]
async fn test_class_records_newest_first() {
    let store = MemoryStore::new();
    let teacher = UserId::new("t1");

    for (created_at, title) in [(1, "Reading"), (3, "Fractions"), (2, "Map work")] {
        let homework = Homework {
            created_at,
            ..Homework::new(title, "General", "Class 2", teacher.clone(), day(1), day(8))
        };
        HomeworkService::add_homework(&store, homework).await.unwrap();
    }
    let other = Homework::new("Other", "General", "Class 5", teacher.clone(), day(1), day(8));
    HomeworkService::add_homework(&store, other).await.unwrap();

    let homework = HomeworkService::get_homework_by_class(&store, "Class 2")
        .await
        .unwrap();
    let titles: Vec<&str> = homework.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Fractions", "Map work", "Reading"]);

    for (created_at, name) in [(10, "Unit test"), (20, "Mid-term")] {
        let exam = Exam {
            created_at,
            ..Exam::new(name, "Maths", "Class 2", day(20), 50, 20, teacher.clone())
        };
        ExamService::add_exam(&store, exam).await.unwrap();
    }
    let exams = ExamService::get_exams_by_class(&store, "Class 2").await.unwrap();
    assert_eq!(exams[0].exam_name, "Mid-term");
    assert_eq!(exams.len(), 2);
}

#[tokio::test]
async fn test_fees_for_student() {
    let store = MemoryStore::new();
    let student = StudentId::new("s1");

    let tuition = Fee::new(student.clone(), "Aarav Kumar", "Class 1", "Tuition", 1500.0, day(30));
    let transport = Fee {
        created_at: tuition.created_at + 1,
        ..Fee::new(student.clone(), "Aarav Kumar", "Class 1", "Transport", 300.0, day(30))
    }
    .paid_on(day(5));
    FeeService::add_fee(&store, tuition).await.unwrap();
    FeeService::add_fee(&store, transport).await.unwrap();

    let fees = FeeService::get_fees_by_student(&store, &student).await.unwrap();
    assert_eq!(fees.len(), 2);
    assert_eq!(fees[0].fee_type, "Transport");
    assert_eq!(fees[0].status, FeeStatus::Paid);
    assert_eq!(fees[1].status, FeeStatus::Pending);
}

#[tokio::test]
async fn test_conversation_excludes_third_parties() {
    let store = MemoryStore::new();
    let (a, b, c) = (UserId::new("a"), UserId::new("b"), UserId::new("c"));

    let messages = [
        (&a, &b, "hello b", 1),
        (&a, &c, "hello c", 2),
        (&b, &a, "hi a", 3),
        (&c, &a, "from c", 4),
    ];
    for (from, to, content, timestamp) in messages {
        let message = Message {
            timestamp,
            ..Message::new(from.clone(), from.as_str(), to.clone(), to.as_str(), content)
        };
        MessageService::send_message(&store, message).await.unwrap();
    }

    let conversation = MessageService::get_conversation(&store, &a, &b).await.unwrap();
    let contents: Vec<&str> = conversation.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["hello b", "hi a"]);

    let inbox = MessageService::get_messages(&store, &a).await.unwrap();
    let contents: Vec<&str> = inbox.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["from c", "hi a"]);
}

#[tokio::test]
async fn test_device_token_recorded_for_signed_in_user() {
    let store = MemoryStore::new();
    let (session, _) = session_with(store.clone(), auth_config());
    let reader = session.subscribe();

    assert!(
        !NotificationService::register_device_token(&store, &reader, "tok-0")
            .await
            .unwrap()
    );
    assert_eq!(store.write_count(), 0);

    let email = generate_unique_email();
    session
        .register(registration("Priya Sharma", &email, UserRole::Parent, ""))
        .await
        .unwrap();
    session.logout();
    let user = session.login(&email, PASSWORD).await.unwrap();

    assert!(
        NotificationService::register_device_token(&store, &reader, "tok-1")
            .await
            .unwrap()
    );
    let profile = UserService::get_user(&store, &user.uid).await.unwrap();
    assert_eq!(profile.device_token.as_deref(), Some("tok-1"));
}

#[test]
fn test_push_dispatch_by_type() {
    let message = PushMessage {
        title: Some("Attendance".to_string()),
        body: None,
        data: HashMap::from([(TYPE_KEY.to_string(), "attendance".to_string())]),
    };
    assert_eq!(NotificationService::dispatch(&message), NotificationKind::Attendance);
}
