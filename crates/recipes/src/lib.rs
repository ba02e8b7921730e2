//! Recipe catalog module.
//!
//! Recipes describe how much of each inventory item one sold portion
//! consumes. The catalog is owned elsewhere; this crate only models what the
//! costing engine reads from it.

pub mod recipe;

pub use recipe::{InventoryItemRef, Portion, Recipe, RecipeCatalog, RecipeItem, ValidRecipeItem};
