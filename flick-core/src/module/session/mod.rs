///! Search session: state machine plus the controller driving it

pub mod controller;
pub mod state;

pub use controller::SearchSession;
pub use state::{SearchFlow, SessionState, Ticket, TrendingFlow};
