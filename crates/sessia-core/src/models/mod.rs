pub mod ai_report;
pub mod client;
pub mod consent;
pub mod invoice;
pub mod report;
pub mod session;
pub mod subscription;
pub mod user;
