pub mod service;

pub use service::NoticeService;
