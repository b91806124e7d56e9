pub mod compare;
pub mod queue;
pub mod sort;

pub use compare::compare;
pub use queue::Queue;
