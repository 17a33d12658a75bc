pub mod service;

pub use service::HomeworkService;
