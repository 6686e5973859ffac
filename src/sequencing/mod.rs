pub mod clock;
pub mod color;
pub mod hit;
pub mod layer;
pub mod pattern;
pub mod persist;
pub mod pop;

pub use clock::{CycleClock, Tempo};
pub use hit::Sweep;
pub use layer::Layer;
pub use pattern::Pattern;
pub use pop::{dot_scale, PopState, MAX_POP_DURATION};
