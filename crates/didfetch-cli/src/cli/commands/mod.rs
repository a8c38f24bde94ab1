//! CLI command handlers. Each command is in its own file.

mod fetch;
mod status;
mod urls;

pub use fetch::run_fetch;
pub use status::run_status;
pub use urls::run_urls;
