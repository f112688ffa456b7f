//! Core identifiers and configuration for the flow orchestrator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one flow run, minted at `start` and retired at reset.
///
/// Every in-flight dispatch carries the run it belongs to; a completed
/// dispatch whose run is no longer current is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowRunId(Uuid);

impl FlowRunId {
    /// Mint a fresh run identity
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FlowRunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FlowRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conversation identity threading one flow run's transcript.
///
/// A single flow yields a single Interaction, so each conversation carries
/// at most one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(Uuid);

impl ConversationId {
    /// Mint a fresh conversation identity
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a delivered Interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionId(Uuid);

impl InteractionId {
    /// Mint a fresh interaction identity
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InteractionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InteractionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of assistant flows.
///
/// Immutable once a flow starts; every flow owns a step table in the
/// resolver and an entry in the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowId {
    WeeklyMenu,
    ShoppingList,
    RecipeNutritionAnalysis,
    RecipeSuggestion,
    IngredientAvailability,
    NutritionalInfo,
    TroubleshootProblem,
    CreativeIdeas,
    RecipePersonalized,
    QuickRecipe,
    BudgetPlanning,
    StoreSuggestion,
    MealAnalysis,
    KidsRecipe,
    SpecialOccasionMenu,
    InventoryOptimization,
    IngredientBasedRecipe,
    BudgetMenu,
    RecipeCompatibility,
    SpecificDietRecipe,
    BalancedDailyMenu,
    RecipeFromImage,
    LeftoverRecipe,
    GuestRecipe,
    FoodTrendAnalysis,
}

impl FlowId {
    /// Every flow the assistant supports, for sweep-style checks
    pub const ALL: [FlowId; 25] = [
        Self::WeeklyMenu,
        Self::ShoppingList,
        Self::RecipeNutritionAnalysis,
        Self::RecipeSuggestion,
        Self::IngredientAvailability,
        Self::NutritionalInfo,
        Self::TroubleshootProblem,
        Self::CreativeIdeas,
        Self::RecipePersonalized,
        Self::QuickRecipe,
        Self::BudgetPlanning,
        Self::StoreSuggestion,
        Self::MealAnalysis,
        Self::KidsRecipe,
        Self::SpecialOccasionMenu,
        Self::InventoryOptimization,
        Self::IngredientBasedRecipe,
        Self::BudgetMenu,
        Self::RecipeCompatibility,
        Self::SpecificDietRecipe,
        Self::BalancedDailyMenu,
        Self::RecipeFromImage,
        Self::LeftoverRecipe,
        Self::GuestRecipe,
        Self::FoodTrendAnalysis,
    ];

    /// Stable snake_case name, matching the serialized form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeeklyMenu => "weekly_menu",
            Self::ShoppingList => "shopping_list",
            Self::RecipeNutritionAnalysis => "recipe_nutrition_analysis",
            Self::RecipeSuggestion => "recipe_suggestion",
            Self::IngredientAvailability => "ingredient_availability",
            Self::NutritionalInfo => "nutritional_info",
            Self::TroubleshootProblem => "troubleshoot_problem",
            Self::CreativeIdeas => "creative_ideas",
            Self::RecipePersonalized => "recipe_personalized",
            Self::QuickRecipe => "quick_recipe",
            Self::BudgetPlanning => "budget_planning",
            Self::StoreSuggestion => "store_suggestion",
            Self::MealAnalysis => "meal_analysis",
            Self::KidsRecipe => "kids_recipe",
            Self::SpecialOccasionMenu => "special_occasion_menu",
            Self::InventoryOptimization => "inventory_optimization",
            Self::IngredientBasedRecipe => "ingredient_based_recipe",
            Self::BudgetMenu => "budget_menu",
            Self::RecipeCompatibility => "recipe_compatibility",
            Self::SpecificDietRecipe => "specific_diet_recipe",
            Self::BalancedDailyMenu => "balanced_daily_menu",
            Self::RecipeFromImage => "recipe_from_image",
            Self::LeftoverRecipe => "leftover_recipe",
            Self::GuestRecipe => "guest_recipe",
            Self::FoodTrendAnalysis => "food_trend_analysis",
        }
    }
}

impl std::fmt::Display for FlowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which data-collection capability a step presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    SelectMember,
    SelectMembers,
    SelectIngredient,
    SelectIngredients,
    SelectRecipe,
    SelectMenu,
    SelectMealHistory,
    SelectDate,
    SelectMonth,
    SelectBudget,
    SelectOccasion,
    SelectDiet,
    SelectImage,
    SelectLocation,
    SelectGuestCount,
    SelectPreferences,
    FreeTextQuery,
}

/// Orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on collection steps per flow run.
    ///
    /// A run exceeding this is treated as a defective (circular) step table,
    /// not a long wizard.
    pub max_steps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_steps: 16 }
    }
}

impl EngineConfig {
    /// Create config with defaults
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-run step bound
    #[inline]
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }
}
