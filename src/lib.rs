pub mod config;
pub mod logger;
pub mod server;
pub mod theme;
pub mod cookie_store;
pub mod locale;
pub mod date_format;
pub mod lang_url;
pub mod reading_time;
pub mod content;
pub mod view;
pub mod util;
mod paginator;
mod query_string;
mod test_data;
