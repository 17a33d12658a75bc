pub mod attendance;
pub mod exams;
pub mod fees;
pub mod homework;
pub mod messages;
pub mod notices;
pub mod notifications;
pub mod repository;
pub mod session;
pub mod students;
pub mod users;
