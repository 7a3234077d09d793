pub mod hpi;
pub mod plugin_server;
