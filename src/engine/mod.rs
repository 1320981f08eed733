pub mod curve;
pub mod event;
pub mod measurement;
pub mod session;
pub mod store;

pub use event::{Changes, Event, InvalidSelection, PointClick, Series};
pub use session::Session;
