//! HTTP API for the umbrella skill

mod handlers;
mod types;

pub use handlers::create_router;

use crate::skill::Skill;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub skill: Arc<Skill>,
}

impl AppState {
    pub fn new(skill: Skill) -> Self {
        Self {
            skill: Arc::new(skill),
        }
    }
}
