// Internal modules - all access should go through api module
pub(crate) mod event;
pub(crate) mod log;
pub(crate) mod model;
pub(crate) mod traits;

// Public API module - the only public interface for listeners and events
pub mod api;
