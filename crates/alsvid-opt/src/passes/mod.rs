//! Built-in optimization passes.

pub mod fold;
pub mod resynth;
pub mod schedule;
pub mod simplify;

pub use fold::PhaseFold;
pub use resynth::LinearResynth;
pub use schedule::RotationSchedule;
pub use simplify::Simplify;
