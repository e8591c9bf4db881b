pub mod faq;
pub mod guide;
pub mod policy;
pub mod progress;
pub mod task;
pub mod user;
