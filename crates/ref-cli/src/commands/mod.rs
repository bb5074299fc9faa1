pub mod dispatch;
pub mod guide;
pub mod list;
pub mod record;
pub mod schema;
pub mod search;
pub mod shared;
pub mod shell;
pub mod status;
