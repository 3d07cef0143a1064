pub mod analysis;
pub mod chart;
pub mod market;
pub mod signals;

pub use analysis::*;
pub use chart::*;
pub use market::*;
pub use signals::*;
