//! Application service wiring.
//!
//! One explicitly constructed context owns every domain store. The
//! application entry point builds it once and passes it down; there is
//! no hidden module-level cache.

use std::sync::Arc;

use crate::client::ApiClient;

use super::favorites::FavoritesService;
use super::pokemon::PokemonService;

/// Upstream list API root used when no override is given.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Dependency-injected bundle of the domain services.
#[derive(Clone)]
pub struct AppServices {
    pub pokemon: PokemonService,
    pub favorites: FavoritesService,
}

impl AppServices {
    /// Wire all services against the production API root.
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Wire all services against a custom API root (tests, staging).
    pub fn with_base_url(client: Arc<dyn ApiClient>, base_url: impl Into<String>) -> Self {
        Self {
            pokemon: PokemonService::new(client, base_url),
            favorites: FavoritesService::new(),
        }
    }
}
