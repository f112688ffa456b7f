//! Terminal dispatch: from a completed context to generated content.
//!
//! [`MealGenerator`] is the seam to the external generation layer, one
//! method per flow. [`DispatchTable`] maps each flow to its required context
//! fields and an adapter that extracts the typed arguments, awaits the
//! generator, and wraps the result as [`InteractionContent`]. Adding a flow
//! is a table entry, not a control-flow edit.
//!
//! The dispatcher verifies required fields before invoking the generator;
//! a miss means the step tables and this table have drifted apart. No retry
//! is attempted: a single rejection is forwarded as-is.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::BoxFuture;
use nutriflow_domain::{
    BudgetPlan, CompatibilityReport, FamilyMember, FoodTrend, GeoPoint, Idea, Ingredient,
    IngredientAvailability, MealRecord, Menu, Recipe, RecipeAnalysis, RecipePreferences,
    ShoppingItem, Store,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::context::{FieldKey, FlowContext};
use crate::error::{DispatchError, GenerationError};
use crate::interaction::InteractionContent;
use crate::types::FlowId;

/// A proposed menu together with its full recipes
#[derive(Debug, Clone, PartialEq)]
pub struct MenuProposal {
    pub menu: Menu,
    pub recipes: Vec<Recipe>,
}

impl MenuProposal {
    /// Create a proposal
    #[inline]
    #[must_use]
    pub fn new(menu: Menu, recipes: Vec<Recipe>) -> Self {
        Self { menu, recipes }
    }
}

/// A generated shopping list
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingProposal {
    pub id: Uuid,
    pub items: Vec<ShoppingItem>,
}

impl ShoppingProposal {
    /// Create a proposal with a fresh list id
    #[inline]
    #[must_use]
    pub fn new(items: Vec<ShoppingItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            items,
        }
    }
}

/// Store suggestions for an ingredient
#[derive(Debug, Clone, PartialEq)]
pub struct StoreAdvice {
    pub stores: Vec<Store>,
    pub recommendation: Option<String>,
}

impl StoreAdvice {
    /// Suggestions without a highlighted recommendation
    #[inline]
    #[must_use]
    pub fn new(stores: Vec<Store>) -> Self {
        Self {
            stores,
            recommendation: None,
        }
    }

    /// Highlight one recommendation
    #[inline]
    #[must_use]
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// Availability of an ingredient near a location
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityReport {
    pub stores: Vec<Store>,
    pub ingredients: Vec<IngredientAvailability>,
}

impl AvailabilityReport {
    /// Create a report
    #[inline]
    #[must_use]
    pub fn new(stores: Vec<Store>, ingredients: Vec<IngredientAvailability>) -> Self {
        Self {
            stores,
            ingredients,
        }
    }
}

/// The external generation layer, one asynchronous operation per flow.
///
/// Each operation receives exactly the typed field subset its flow
/// collects and may reject with any [`GenerationError`]; the orchestrator
/// treats rejections opaquely.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealGenerator: Send + Sync {
    async fn personalized_recipe(&self, member: FamilyMember) -> Result<Recipe, GenerationError>;

    async fn weekly_menu(
        &self,
        members: Vec<FamilyMember>,
        date_start: NaiveDate,
    ) -> Result<MenuProposal, GenerationError>;

    async fn shopping_list(
        &self,
        menu: Menu,
        current_ingredients: Vec<Ingredient>,
    ) -> Result<ShoppingProposal, GenerationError>;

    async fn analyze_recipe(&self, recipe: Recipe) -> Result<RecipeAnalysis, GenerationError>;

    async fn suggest_recipe(
        &self,
        ingredients: Vec<Ingredient>,
        preferences: RecipePreferences,
    ) -> Result<Recipe, GenerationError>;

    async fn quick_recipe(&self, member: FamilyMember) -> Result<Recipe, GenerationError>;

    async fn budget_plan(&self, limit: f64, month: String) -> Result<BudgetPlan, GenerationError>;

    async fn suggest_stores(&self, ingredient: Ingredient) -> Result<StoreAdvice, GenerationError>;

    async fn analyze_meals(
        &self,
        history: Vec<MealRecord>,
        member: FamilyMember,
    ) -> Result<RecipeAnalysis, GenerationError>;

    async fn kids_recipe(&self, member: FamilyMember) -> Result<Recipe, GenerationError>;

    async fn occasion_menu(
        &self,
        members: Vec<FamilyMember>,
        occasion: String,
        date: NaiveDate,
    ) -> Result<MenuProposal, GenerationError>;

    async fn optimize_inventory(
        &self,
        ingredients: Vec<Ingredient>,
    ) -> Result<Recipe, GenerationError>;

    async fn ingredient_recipe(
        &self,
        ingredient: Ingredient,
        member: FamilyMember,
    ) -> Result<Recipe, GenerationError>;

    async fn budget_menu(
        &self,
        members: Vec<FamilyMember>,
        budget: f64,
    ) -> Result<MenuProposal, GenerationError>;

    async fn check_compatibility(
        &self,
        recipe: Recipe,
        members: Vec<FamilyMember>,
    ) -> Result<CompatibilityReport, GenerationError>;

    async fn diet_recipe(
        &self,
        member: FamilyMember,
        diet: String,
    ) -> Result<Recipe, GenerationError>;

    async fn balanced_daily_menu(
        &self,
        member: FamilyMember,
        date: NaiveDate,
    ) -> Result<MenuProposal, GenerationError>;

    async fn recipe_from_image(
        &self,
        image_url: String,
        member: FamilyMember,
    ) -> Result<Recipe, GenerationError>;

    async fn leftover_recipe(
        &self,
        ingredients: Vec<Ingredient>,
    ) -> Result<Recipe, GenerationError>;

    async fn guest_recipe(
        &self,
        members: Vec<FamilyMember>,
        guest_count: u32,
    ) -> Result<Recipe, GenerationError>;

    async fn ingredient_availability(
        &self,
        name: String,
        location: GeoPoint,
    ) -> Result<AvailabilityReport, GenerationError>;

    async fn nutritional_info(&self, query: String) -> Result<RecipeAnalysis, GenerationError>;

    async fn troubleshoot(&self, query: String) -> Result<String, GenerationError>;

    async fn creative_ideas(&self, query: String) -> Result<Vec<Idea>, GenerationError>;

    async fn food_trends(
        &self,
        members: Vec<FamilyMember>,
    ) -> Result<Vec<FoodTrend>, GenerationError>;
}

type DispatchFuture = BoxFuture<'static, Result<InteractionContent, DispatchError>>;
type DispatchFn = fn(Arc<dyn MealGenerator>, FlowContext) -> DispatchFuture;

/// Required fields and adapter for one flow
pub struct DispatchEntry {
    required: &'static [FieldKey],
    run: DispatchFn,
}

impl DispatchEntry {
    /// Context fields the adapter will extract
    #[inline]
    #[must_use]
    pub fn required(&self) -> &'static [FieldKey] {
        self.required
    }

    /// Verify required fields, then run the adapter.
    pub async fn invoke(
        &self,
        generator: Arc<dyn MealGenerator>,
        context: FlowContext,
    ) -> Result<InteractionContent, DispatchError> {
        for key in self.required {
            if !context.contains(*key) {
                warn!(%key, "terminal context missing required field");
                return Err(DispatchError::MissingField(*key));
            }
        }
        (self.run)(generator, context).await
    }
}

impl std::fmt::Debug for DispatchEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchEntry")
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Flow-to-operation lookup table
#[derive(Debug)]
pub struct DispatchTable {
    entries: HashMap<FlowId, DispatchEntry>,
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl DispatchTable {
    /// The entry for a flow, if registered
    #[inline]
    #[must_use]
    pub fn entry(&self, flow: FlowId) -> Option<&DispatchEntry> {
        self.entries.get(&flow)
    }

    /// The full standard dispatch catalog
    #[must_use]
    pub fn standard() -> Self {
        let mut entries: HashMap<FlowId, DispatchEntry> = HashMap::new();

        entries.insert(
            FlowId::RecipePersonalized,
            DispatchEntry {
                required: &[FieldKey::Member],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let member = ctx.require_member()?;
                        let recipe = generator.personalized_recipe(member).await?;
                        Ok(InteractionContent::Recipe { recipe })
                    })
                },
            },
        );
        entries.insert(
            FlowId::WeeklyMenu,
            DispatchEntry {
                required: &[FieldKey::Members, FieldKey::DateStart],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let members = ctx.require_members()?;
                        let date_start = ctx.require_date(FieldKey::DateStart)?;
                        let MenuProposal { menu, recipes } =
                            generator.weekly_menu(members, date_start).await?;
                        Ok(InteractionContent::MenuSuggestion {
                            description: menu.description.clone(),
                            menu,
                            recipes,
                        })
                    })
                },
            },
        );
        entries.insert(
            FlowId::ShoppingList,
            DispatchEntry {
                required: &[FieldKey::Menu, FieldKey::Ingredients],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let menu = ctx.require_menu()?;
                        let current = ctx.require_ingredients()?;
                        let list = generator.shopping_list(menu, current).await?;
                        Ok(InteractionContent::ShoppingListSuggestion {
                            list_id: list.id,
                            items: list.items,
                        })
                    })
                },
            },
        );
        entries.insert(
            FlowId::RecipeNutritionAnalysis,
            DispatchEntry {
                required: &[FieldKey::Recipe],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let recipe = ctx.require_recipe()?;
                        let recipe_id = recipe.id;
                        let analysis = generator.analyze_recipe(recipe).await?;
                        Ok(InteractionContent::RecipeAnalysis {
                            recipe_id: Some(recipe_id),
                            analysis,
                        })
                    })
                },
            },
        );
        entries.insert(
            FlowId::RecipeSuggestion,
            DispatchEntry {
                required: &[FieldKey::Ingredients, FieldKey::Preferences],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let ingredients = ctx.require_ingredients()?;
                        let preferences = ctx.require_preferences()?;
                        let recipe = generator.suggest_recipe(ingredients, preferences).await?;
                        Ok(InteractionContent::RecipeSuggestion { recipe })
                    })
                },
            },
        );
        entries.insert(
            FlowId::QuickRecipe,
            DispatchEntry {
                required: &[FieldKey::Member],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let member = ctx.require_member()?;
                        let recipe = generator.quick_recipe(member).await?;
                        Ok(InteractionContent::Recipe { recipe })
                    })
                },
            },
        );
        entries.insert(
            FlowId::BudgetPlanning,
            DispatchEntry {
                required: &[FieldKey::BudgetLimit, FieldKey::Month],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let limit = ctx.require_amount(FieldKey::BudgetLimit)?;
                        let month = ctx.require_text(FieldKey::Month)?;
                        let budget = generator.budget_plan(limit, month).await?;
                        Ok(InteractionContent::Budget { budget })
                    })
                },
            },
        );
        entries.insert(
            FlowId::StoreSuggestion,
            DispatchEntry {
                required: &[FieldKey::Ingredient],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let ingredient = ctx.require_ingredient()?;
                        let advice = generator.suggest_stores(ingredient).await?;
                        Ok(InteractionContent::Stores {
                            stores: advice.stores,
                            recommendation: advice.recommendation,
                        })
                    })
                },
            },
        );
        entries.insert(
            FlowId::MealAnalysis,
            DispatchEntry {
                required: &[FieldKey::Member, FieldKey::MealHistory],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let member = ctx.require_member()?;
                        let history = ctx.require_meal_history()?;
                        let analysis = generator.analyze_meals(history, member).await?;
                        Ok(InteractionContent::RecipeAnalysis {
                            recipe_id: None,
                            analysis,
                        })
                    })
                },
            },
        );
        entries.insert(
            FlowId::KidsRecipe,
            DispatchEntry {
                required: &[FieldKey::Member],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let member = ctx.require_member()?;
                        let recipe = generator.kids_recipe(member).await?;
                        Ok(InteractionContent::Recipe { recipe })
                    })
                },
            },
        );
        entries.insert(
            FlowId::SpecialOccasionMenu,
            DispatchEntry {
                required: &[FieldKey::Members, FieldKey::Occasion, FieldKey::Date],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let members = ctx.require_members()?;
                        let occasion = ctx.require_text(FieldKey::Occasion)?;
                        let date = ctx.require_date(FieldKey::Date)?;
                        let MenuProposal { menu, recipes } =
                            generator.occasion_menu(members, occasion, date).await?;
                        Ok(InteractionContent::MenuSuggestion {
                            description: menu.description.clone(),
                            menu,
                            recipes,
                        })
                    })
                },
            },
        );
        entries.insert(
            FlowId::InventoryOptimization,
            DispatchEntry {
                required: &[FieldKey::Ingredients],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let ingredients = ctx.require_ingredients()?;
                        let recipe = generator.optimize_inventory(ingredients).await?;
                        Ok(InteractionContent::Recipe { recipe })
                    })
                },
            },
        );
        entries.insert(
            FlowId::IngredientBasedRecipe,
            DispatchEntry {
                required: &[FieldKey::Member, FieldKey::Ingredient],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let member = ctx.require_member()?;
                        let ingredient = ctx.require_ingredient()?;
                        let recipe = generator.ingredient_recipe(ingredient, member).await?;
                        Ok(InteractionContent::Recipe { recipe })
                    })
                },
            },
        );
        entries.insert(
            FlowId::BudgetMenu,
            DispatchEntry {
                required: &[FieldKey::Members, FieldKey::Budget],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let members = ctx.require_members()?;
                        let budget = ctx.require_amount(FieldKey::Budget)?;
                        let MenuProposal { menu, recipes } =
                            generator.budget_menu(members, budget).await?;
                        Ok(InteractionContent::MenuSuggestion {
                            description: menu.description.clone(),
                            menu,
                            recipes,
                        })
                    })
                },
            },
        );
        entries.insert(
            FlowId::RecipeCompatibility,
            DispatchEntry {
                required: &[FieldKey::Members, FieldKey::Recipe],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let members = ctx.require_members()?;
                        let recipe = ctx.require_recipe()?;
                        let compatibility = generator
                            .check_compatibility(recipe.clone(), members)
                            .await?;
                        Ok(InteractionContent::RecipeCompatibility {
                            recipe,
                            compatibility,
                        })
                    })
                },
            },
        );
        entries.insert(
            FlowId::SpecificDietRecipe,
            DispatchEntry {
                required: &[FieldKey::Member, FieldKey::Diet],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let member = ctx.require_member()?;
                        let diet = ctx.require_text(FieldKey::Diet)?;
                        let recipe = generator.diet_recipe(member, diet).await?;
                        Ok(InteractionContent::Recipe { recipe })
                    })
                },
            },
        );
        entries.insert(
            FlowId::BalancedDailyMenu,
            DispatchEntry {
                required: &[FieldKey::Member, FieldKey::Date],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let member = ctx.require_member()?;
                        let date = ctx.require_date(FieldKey::Date)?;
                        let MenuProposal { menu, recipes } =
                            generator.balanced_daily_menu(member, date).await?;
                        Ok(InteractionContent::MenuSuggestion {
                            description: menu.description.clone(),
                            menu,
                            recipes,
                        })
                    })
                },
            },
        );
        entries.insert(
            FlowId::RecipeFromImage,
            DispatchEntry {
                required: &[FieldKey::Member, FieldKey::ImageUrl],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let member = ctx.require_member()?;
                        let image_url = ctx.require_text(FieldKey::ImageUrl)?;
                        let recipe = generator.recipe_from_image(image_url, member).await?;
                        Ok(InteractionContent::Recipe { recipe })
                    })
                },
            },
        );
        entries.insert(
            FlowId::LeftoverRecipe,
            DispatchEntry {
                required: &[FieldKey::Ingredients],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let ingredients = ctx.require_ingredients()?;
                        let recipe = generator.leftover_recipe(ingredients).await?;
                        Ok(InteractionContent::Recipe { recipe })
                    })
                },
            },
        );
        entries.insert(
            FlowId::GuestRecipe,
            DispatchEntry {
                required: &[FieldKey::Members, FieldKey::GuestCount],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let members = ctx.require_members()?;
                        let guest_count = ctx.require_guest_count()?;
                        let recipe = generator.guest_recipe(members, guest_count).await?;
                        Ok(InteractionContent::Recipe { recipe })
                    })
                },
            },
        );
        entries.insert(
            FlowId::IngredientAvailability,
            DispatchEntry {
                required: &[FieldKey::IngredientName, FieldKey::Location],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let name = ctx.require_text(FieldKey::IngredientName)?;
                        let location = ctx.require_location()?;
                        let report = generator.ingredient_availability(name, location).await?;
                        Ok(InteractionContent::IngredientAvailability {
                            stores: report.stores,
                            ingredients: report.ingredients,
                        })
                    })
                },
            },
        );
        entries.insert(
            FlowId::NutritionalInfo,
            DispatchEntry {
                required: &[FieldKey::Query],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let query = ctx.require_text(FieldKey::Query)?;
                        let analysis = generator.nutritional_info(query).await?;
                        Ok(InteractionContent::NutritionalInfo { analysis })
                    })
                },
            },
        );
        entries.insert(
            FlowId::TroubleshootProblem,
            DispatchEntry {
                required: &[FieldKey::Query],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let question = ctx.require_text(FieldKey::Query)?;
                        let solution = generator.troubleshoot(question.clone()).await?;
                        Ok(InteractionContent::TroubleshootProblem { question, solution })
                    })
                },
            },
        );
        entries.insert(
            FlowId::CreativeIdeas,
            DispatchEntry {
                required: &[FieldKey::Query],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let query = ctx.require_text(FieldKey::Query)?;
                        let ideas = generator.creative_ideas(query).await?;
                        Ok(InteractionContent::CreativeIdeas { ideas })
                    })
                },
            },
        );
        entries.insert(
            FlowId::FoodTrendAnalysis,
            DispatchEntry {
                required: &[FieldKey::Members],
                run: |generator, ctx| {
                    Box::pin(async move {
                        let members = ctx.require_members()?;
                        let trends = generator.food_trends(members).await?;
                        Ok(InteractionContent::FoodTrends { trends })
                    })
                },
            },
        );

        debug!(flows = entries.len(), "dispatch table built");
        Self { entries }
    }
}
