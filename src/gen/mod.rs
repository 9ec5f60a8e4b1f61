pub mod sweep;
pub mod voice;

pub use self::sweep::*;
pub use self::voice::*;
