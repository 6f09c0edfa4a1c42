mod classification;
mod record_set;
mod zone;

pub use classification::*;
pub use record_set::*;
pub use zone::*;
