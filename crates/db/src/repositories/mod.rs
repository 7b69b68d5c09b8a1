//! Per-table query helpers returning raw JSON records.

pub mod category_repo;
pub mod notification_repo;
pub mod quote_repo;
pub mod request_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use notification_repo::NotificationRepo;
pub use quote_repo::QuoteRepo;
pub use request_repo::RequestRepo;
pub use user_repo::UserRepo;
