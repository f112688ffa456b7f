//! Recipes, menus, ingredients, and meal history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique recipe identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub Uuid);

impl RecipeId {
    /// Generate a new random recipe ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique menu identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(pub Uuid);

impl MenuId {
    /// Generate a new random menu ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MenuId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MenuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Measurement unit for ingredient quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Grams,
    Kilograms,
    Milliliters,
    Liters,
    Pieces,
    Tablespoons,
    Teaspoons,
    Cups,
    Pinch,
}

impl Unit {
    /// Short label used in shopping lists
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Kilograms => "kg",
            Self::Milliliters => "ml",
            Self::Liters => "l",
            Self::Pieces => "pcs",
            Self::Tablespoons => "tbsp",
            Self::Teaspoons => "tsp",
            Self::Cups => "cups",
            Self::Pinch => "pinch",
        }
    }
}

/// An ingredient with a quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
}

impl Ingredient {
    /// Create a new ingredient
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit,
        }
    }
}

/// A recipe produced or referenced by the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    pub servings: u32,
    pub prep_time_minutes: u32,
}

impl Recipe {
    /// Create a recipe with empty ingredients and steps
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: RecipeId::new(),
            name: name.into(),
            description: description.into(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            servings: 4,
            prep_time_minutes: 30,
        }
    }

    /// Add an ingredient
    #[inline]
    #[must_use]
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Add a preparation step
    #[inline]
    #[must_use]
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Set the serving count
    #[inline]
    #[must_use]
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }
}

/// A planned menu spanning one or more days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,
    pub name: String,
    pub description: String,
    /// Recipes composing the menu, in serving order
    #[serde(default)]
    pub recipes: Vec<RecipeId>,
    pub date_start: Option<NaiveDate>,
}

impl Menu {
    /// Create an empty menu
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: MenuId::new(),
            name: name.into(),
            description: description.into(),
            recipes: Vec::new(),
            date_start: None,
        }
    }

    /// Add a recipe reference
    #[inline]
    #[must_use]
    pub fn with_recipe(mut self, recipe: RecipeId) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Set the starting date
    #[inline]
    #[must_use]
    pub fn with_date_start(mut self, date: NaiveDate) -> Self {
        self.date_start = Some(date);
        self
    }
}

/// Which meal of the day a record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One past meal, used by the meal-analysis flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub eaten_at: DateTime<Utc>,
    pub meal_type: MealType,
    pub description: String,
}

impl MealRecord {
    /// Create a meal record
    #[inline]
    #[must_use]
    pub fn new(eaten_at: DateTime<Utc>, meal_type: MealType, description: impl Into<String>) -> Self {
        Self {
            eaten_at,
            meal_type,
            description: description.into(),
        }
    }
}

/// One line of a generated shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    /// Stores known to carry the item
    #[serde(default)]
    pub stores: Vec<String>,
}

impl ShoppingItem {
    /// Create a shopping item with no store hints
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit,
            stores: Vec::new(),
        }
    }
}
