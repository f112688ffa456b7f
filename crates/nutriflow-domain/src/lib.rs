//! NutriFlow Domain
//!
//! Pure entity types shared by the assistant orchestrator and its consumers.
//!
//! # Core Concepts
//!
//! - [`FamilyMember`]: a household profile with dietary constraints
//! - [`Recipe`], [`Menu`], [`Ingredient`]: the cooking surface
//! - [`Store`], [`BudgetPlan`]: the shopping surface
//! - [`RecipeAnalysis`], [`CompatibilityReport`], [`FoodTrend`]: analysis
//!   results produced by the generation layer
//!
//! Everything here is plain data: serde-serializable, no async, no I/O.

#![warn(unreachable_pub)]

mod family;
mod food;
mod insight;
mod market;

pub use family::{FamilyMember, MemberId};
pub use food::{
    Ingredient, MealRecord, MealType, Menu, MenuId, Recipe, RecipeId, ShoppingItem, Unit,
};
pub use insight::{
    CompatibilityReport, FoodTrend, Idea, NutrientFact, RecipeAnalysis, RecipePreferences,
    SpiceLevel,
};
pub use market::{BudgetPlan, GeoPoint, IngredientAvailability, MealAllocation, Store};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
