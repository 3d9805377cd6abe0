mod configuration;
mod envelope;
mod invocation;
mod status;

pub use configuration::*;
pub use envelope::*;
pub use invocation::*;
pub use status::*;
