mod clock;
mod machine;
mod state;

pub use clock::{ClockSubscription, SessionClock};
pub use machine::SessionStateMachine;
pub use state::{Durations, Phase, SessionState};
