//! Application state and composition.

use std::sync::Arc;

use fichas_domain::GameSystemRegistry;

use crate::config::AppConfig;
use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    ports::{CharacterRepo, ClockPort, RandomPort},
};
use crate::use_cases::CharacterUseCases;

/// Main application state.
///
/// Holds use cases and the game system registry.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub systems: GameSystemRegistry,
}

/// Container for all use cases.
pub struct UseCases {
    pub characters: CharacterUseCases,
}

impl App {
    /// Compose the application with the real clock and RNG.
    pub fn new(character_repo: Arc<dyn CharacterRepo>, config: &AppConfig) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());
        Self::with_ports(character_repo, clock, random, config)
    }

    pub fn with_ports(
        character_repo: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        config: &AppConfig,
    ) -> Self {
        let use_cases = UseCases {
            characters: CharacterUseCases::new(
                character_repo,
                clock,
                random,
                config.roll_delay,
            ),
        };

        Self {
            use_cases,
            systems: GameSystemRegistry::new(),
        }
    }
}
