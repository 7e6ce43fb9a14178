pub mod api;
pub mod cycle;
pub mod formatter;
pub mod logging;
pub mod validator;
pub mod watcher;
