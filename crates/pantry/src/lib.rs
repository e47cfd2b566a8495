//! Household records consumed through the scoped repository.
//!
//! This crate only defines record shapes and their ownership capability (no IO,
//! no HTTP, no storage). Recipes and pantry items belong to one household
//! member; measurement units are shared by everyone.

pub mod item;
pub mod recipe;
pub mod unit;

pub use item::{PantryItem, PantryItemChanges};
pub use recipe::{Recipe, RecipeChanges};
pub use unit::{Unit, UnitChanges};
