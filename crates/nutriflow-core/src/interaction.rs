//! The canonical output record of a completed flow.
//!
//! Success and failure travel the same shape: an [`Interaction`] whose
//! content is tagged by kind. The display layer never sees a raw error.

use chrono::{DateTime, Utc};
use nutriflow_domain::{
    BudgetPlan, CompatibilityReport, FoodTrend, Idea, IngredientAvailability, Menu, Recipe,
    RecipeAnalysis, ShoppingItem, Store,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::DispatchError;
use crate::types::{ConversationId, InteractionId};

/// Flow output content, discriminated by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionContent {
    /// A single generated or adapted recipe
    Recipe { recipe: Recipe },
    /// A proposed menu with its full recipes
    MenuSuggestion {
        menu: Menu,
        description: String,
        recipes: Vec<Recipe>,
    },
    /// A generated shopping list
    ShoppingListSuggestion {
        list_id: Uuid,
        items: Vec<ShoppingItem>,
    },
    /// Nutritional breakdown of a recipe or meal history
    RecipeAnalysis {
        recipe_id: Option<nutriflow_domain::RecipeId>,
        analysis: RecipeAnalysis,
    },
    /// A recipe suggested from ingredients and preferences
    RecipeSuggestion { recipe: Recipe },
    /// A monthly budget plan
    Budget { budget: BudgetPlan },
    /// Stores stocking an ingredient
    Stores {
        stores: Vec<Store>,
        recommendation: Option<String>,
    },
    /// Compatibility verdict for a recipe and a set of members
    RecipeCompatibility {
        recipe: Recipe,
        compatibility: CompatibilityReport,
    },
    /// Ingredient availability near a location
    IngredientAvailability {
        stores: Vec<Store>,
        ingredients: Vec<IngredientAvailability>,
    },
    /// Answer to a free-form nutrition question
    NutritionalInfo { analysis: RecipeAnalysis },
    /// Answer to a cooking-problem question
    TroubleshootProblem { question: String, solution: String },
    /// Free-form creative suggestions
    CreativeIdeas { ideas: Vec<Idea> },
    /// Food trends observed for a household
    FoodTrends { trends: Vec<FoodTrend> },
    /// A failed flow, with a human-readable message
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
}

impl InteractionContent {
    /// The content-kind discriminant, matching the serialized tag
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Recipe { .. } => "recipe",
            Self::MenuSuggestion { .. } => "menu_suggestion",
            Self::ShoppingListSuggestion { .. } => "shopping_list_suggestion",
            Self::RecipeAnalysis { .. } => "recipe_analysis",
            Self::RecipeSuggestion { .. } => "recipe_suggestion",
            Self::Budget { .. } => "budget",
            Self::Stores { .. } => "stores",
            Self::RecipeCompatibility { .. } => "recipe_compatibility",
            Self::IngredientAvailability { .. } => "ingredient_availability",
            Self::NutritionalInfo { .. } => "nutritional_info",
            Self::TroubleshootProblem { .. } => "troubleshoot_problem",
            Self::CreativeIdeas { .. } => "creative_ideas",
            Self::FoodTrends { .. } => "food_trends",
            Self::Error { .. } => "error",
        }
    }

    /// Whether this content reports a failed flow
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// The uniform record handed to the display layer, exactly one per
/// completed flow run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: InteractionId,
    pub content: InteractionContent,
    /// Always false; the assistant authored this record
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    /// Content-kind discriminant, duplicated for cheap filtering
    pub kind: String,
    pub conversation_id: ConversationId,
}

/// Wraps a dispatch outcome into an [`Interaction`]
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionFormatter;

impl InteractionFormatter {
    /// Produce the single Interaction for a finished flow run.
    ///
    /// Success content passes through unchanged; a dispatch error becomes
    /// error content with the error's display message.
    #[must_use]
    pub fn format(
        outcome: Result<InteractionContent, DispatchError>,
        conversation_id: ConversationId,
    ) -> Interaction {
        let content = match outcome {
            Ok(content) => content,
            Err(err) => {
                debug!(%err, "formatting dispatch failure as error interaction");
                InteractionContent::Error {
                    message: err.to_string(),
                    code: None,
                }
            }
        };
        Interaction {
            id: InteractionId::new(),
            kind: content.kind().to_owned(),
            content,
            is_user: false,
            timestamp: Utc::now(),
            conversation_id,
        }
    }
}
