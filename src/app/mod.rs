mod controller;
pub mod fsm;

pub use controller::Controller;
pub use fsm::{AppContext, AppEvent, AppSnapshot, AppState, AppStateMachine};
