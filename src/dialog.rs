//! Dialog turn resolver
//!
//! Decides, from the slots known so far, whether to ask for a city, ask for
//! a date, or answer. Session state goes in as a snapshot and comes back out
//! as a new one; the host persists it between turns.

mod date;
pub mod directive;
mod intent;
mod resolver;
mod state;
mod umbrella;

#[cfg(test)]
mod proptests;

pub use date::{resolve_date, resolve_today};
pub use directive::TurnDirective;
pub use intent::{Intent, InvalidIntent, SlotInput};
pub use resolver::{resolve_turn, TurnContext};
pub use state::{ResolvedDate, ResolvedLocation, SessionState};
pub use umbrella::{decide, Advice, RainChance};
