pub mod layout;
pub mod language_selector;
pub mod list_renderer;
pub mod post_renderer;
