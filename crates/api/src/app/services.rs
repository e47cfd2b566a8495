use std::sync::Arc;

use tenantscope_infra::{InMemoryStore, ScopedRepository};
use tenantscope_pantry::{PantryItem, Recipe, Unit};

pub type RecipeRepository = ScopedRepository<Recipe, Arc<InMemoryStore<Recipe>>>;
pub type PantryRepository = ScopedRepository<PantryItem, Arc<InMemoryStore<PantryItem>>>;
pub type UnitRepository = ScopedRepository<Unit, Arc<InMemoryStore<Unit>>>;

/// Repositories shared by all handlers.
#[derive(Debug)]
pub struct AppServices {
    pub recipes: RecipeRepository,
    pub pantry: PantryRepository,
    pub units: UnitRepository,
}

impl AppServices {
    pub fn new(
        recipes: Arc<InMemoryStore<Recipe>>,
        pantry: Arc<InMemoryStore<PantryItem>>,
        units: Arc<InMemoryStore<Unit>>,
    ) -> Self {
        Self {
            recipes: ScopedRepository::new(recipes),
            pantry: ScopedRepository::new(pantry),
            units: ScopedRepository::new(units),
        }
    }

    /// Empty owned stores plus the default shared units.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::with_records(default_units())),
        )
    }
}

pub fn default_units() -> Vec<Unit> {
    vec![
        Unit::new("g", "gram"),
        Unit::new("ml", "millilitre"),
        Unit::new("pc", "piece"),
    ]
}
