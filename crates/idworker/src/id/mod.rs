#[cfg(feature = "serde")]
mod serde;
mod snowflake;

#[cfg(feature = "serde")]
pub use self::serde::*;
pub use snowflake::*;
