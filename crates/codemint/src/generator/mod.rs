mod fixed_length;
mod interface;
mod prefixed;
mod snowflake;
mod status;

pub use fixed_length::*;
pub use interface::*;
pub use prefixed::*;
pub use snowflake::*;
pub use status::*;
