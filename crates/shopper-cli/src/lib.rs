pub mod lookup;
pub mod util;
