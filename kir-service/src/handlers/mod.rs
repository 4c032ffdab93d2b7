pub mod announcements;
pub mod diagnostics;
pub mod health;
pub mod metrics;
pub mod root;
pub mod works;

pub use announcements::{create_announcement, list_announcements};
pub use diagnostics::test_database;
pub use health::{health_check, readiness_check};
pub use root::{hello, read_root};
pub use works::{create_work, list_works};
