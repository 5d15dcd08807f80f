mod fixed_width;
mod radix;
mod table;

pub use fixed_width::*;
pub use radix::*;
pub use table::*;
