// Server module entry
// Listener, per-connection serving, accept loop and signal-driven shutdown

pub mod connection;
pub mod listener;
pub mod serve;
pub mod signal;

pub use listener::create_listener;
pub use serve::serve;
pub use signal::{start_signal_handler, SignalHandler};
