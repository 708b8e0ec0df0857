//! Three-step wizard state machine.

pub mod state;
pub mod step;
pub mod view;

pub use state::{Phase, Wizard};
pub use step::Step;
pub use view::{Effect, PanelState, Preview, StepView};
