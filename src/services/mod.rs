//! Domain stores built on the store primitives.

mod context;
mod favorites;
mod pokemon;

pub use context::{AppServices, DEFAULT_BASE_URL};
pub use favorites::FavoritesService;
pub use pokemon::{Paging, PokemonPage, PokemonService, PokemonSummary, ServiceError};
