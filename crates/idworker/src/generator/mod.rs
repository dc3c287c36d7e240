mod builder;
mod error;
mod interface;
mod mutex;
mod status;
mod worker;

pub use builder::*;
pub use error::*;
pub use interface::*;
pub(crate) use mutex::*;
pub use status::*;
pub use worker::*;
