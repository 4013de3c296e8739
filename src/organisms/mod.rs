mod behavior;
mod components;
mod ecosystem_stats;
mod motion;
mod tuning;

pub use behavior::*;
pub use components::*;
pub use ecosystem_stats::*;
pub use motion::*;
pub use tuning::*;
