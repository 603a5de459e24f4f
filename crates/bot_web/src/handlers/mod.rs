mod messages;

pub use messages::{health, messages};
