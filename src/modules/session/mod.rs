pub mod navigation;
pub mod service;

pub use navigation::{Feedback, Intent, NavEvent, NavState, Navigator, transition};
pub use service::{SessionManager, SessionReader};
