pub mod service;

pub use service::ExamService;
