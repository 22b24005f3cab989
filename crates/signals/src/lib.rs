pub mod aggregator;
pub mod classifier;
pub mod evaluate;

pub use aggregator::*;
pub use classifier::*;
pub use evaluate::*;
