pub mod level;
pub mod value;
pub mod record;
pub mod request_id;
pub mod sink;
pub mod error;
pub mod env;

#[cfg(feature = "axiom")]
pub mod axiom;

pub mod emitter;
pub mod init;
pub mod noop_sink;

pub use emitter::{Delivery, Emitter};
pub use level::Level;
pub use value::{ErrorValue, Payload, Value};
