//! Shared test doubles: a canned generator, a recording surface, and
//! well-formed sample step outputs.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use parking_lot::Mutex;
use tokio::sync::Notify;

use nutriflow_core::{
    AvailabilityReport, ChatSurface, FieldKey, FieldValue, FlowId, GenerationError, Interaction,
    MealGenerator, MenuProposal, ShoppingProposal, StoreAdvice,
};
use nutriflow_domain::{
    BudgetPlan, CompatibilityReport, FamilyMember, FoodTrend, GeoPoint, Idea, Ingredient,
    IngredientAvailability, MealAllocation, MealRecord, MealType, Menu, Recipe, RecipeAnalysis,
    RecipePreferences, ShoppingItem, SpiceLevel, Store, Unit,
};

/// Install a per-test subscriber honoring `RUST_LOG`
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records every delivered Interaction
pub struct RecordingSurface {
    pub delivered: Mutex<Vec<(Interaction, FlowId)>>,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            delivered: Mutex::new(Vec::new()),
        })
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().len()
    }
}

impl ChatSurface for RecordingSurface {
    fn deliver(&self, interaction: Interaction, flow: FlowId) {
        self.delivered.lock().push((interaction, flow));
    }
}

/// Generator returning canned results for every flow.
///
/// An optional gate holds each call in flight until notified; an optional
/// injected error makes every call reject.
pub struct StubGenerator {
    gate: Option<Arc<Notify>>,
    fail_with: Option<GenerationError>,
}

impl StubGenerator {
    pub fn answering() -> Self {
        Self {
            gate: None,
            fail_with: None,
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self {
            gate: None,
            fail_with: Some(error),
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            fail_with: None,
        }
    }

    async fn settle(&self) -> Result<(), GenerationError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn canned_recipe(name: &str) -> Recipe {
    Recipe::new(name, "A canned test recipe")
        .with_ingredient(Ingredient::new("carrot", 2.0, Unit::Pieces))
        .with_step("Chop everything")
}

fn canned_menu_proposal() -> MenuProposal {
    let recipe = canned_recipe("Lentil stew");
    let menu = Menu::new("Test menu", "Seven balanced dinners").with_recipe(recipe.id);
    MenuProposal::new(menu, vec![recipe])
}

#[async_trait]
impl MealGenerator for StubGenerator {
    async fn personalized_recipe(&self, _member: FamilyMember) -> Result<Recipe, GenerationError> {
        self.settle().await?;
        Ok(canned_recipe("Personalized bowl"))
    }

    async fn weekly_menu(
        &self,
        _members: Vec<FamilyMember>,
        _date_start: NaiveDate,
    ) -> Result<MenuProposal, GenerationError> {
        self.settle().await?;
        Ok(canned_menu_proposal())
    }

    async fn shopping_list(
        &self,
        _menu: Menu,
        _current_ingredients: Vec<Ingredient>,
    ) -> Result<ShoppingProposal, GenerationError> {
        self.settle().await?;
        Ok(ShoppingProposal::new(vec![ShoppingItem::new(
            "lentils",
            500.0,
            Unit::Grams,
        )]))
    }

    async fn analyze_recipe(&self, _recipe: Recipe) -> Result<RecipeAnalysis, GenerationError> {
        self.settle().await?;
        Ok(RecipeAnalysis::new(350.0, "Hearty and balanced"))
    }

    async fn suggest_recipe(
        &self,
        _ingredients: Vec<Ingredient>,
        _preferences: RecipePreferences,
    ) -> Result<Recipe, GenerationError> {
        self.settle().await?;
        Ok(canned_recipe("Suggested stir-fry"))
    }

    async fn quick_recipe(&self, _member: FamilyMember) -> Result<Recipe, GenerationError> {
        self.settle().await?;
        Ok(canned_recipe("Fifteen-minute pasta"))
    }

    async fn budget_plan(
        &self,
        limit: f64,
        month: String,
    ) -> Result<BudgetPlan, GenerationError> {
        self.settle().await?;
        Ok(BudgetPlan::new(limit, month)
            .with_allocation(MealAllocation::new("groceries", limit * 0.8)))
    }

    async fn suggest_stores(
        &self,
        _ingredient: Ingredient,
    ) -> Result<StoreAdvice, GenerationError> {
        self.settle().await?;
        Ok(
            StoreAdvice::new(vec![Store::new("Green Market", "12 Elm St")])
                .with_recommendation("Green Market has it freshest"),
        )
    }

    async fn analyze_meals(
        &self,
        _history: Vec<MealRecord>,
        _member: FamilyMember,
    ) -> Result<RecipeAnalysis, GenerationError> {
        self.settle().await?;
        Ok(RecipeAnalysis::new(1800.0, "Slightly low on fiber"))
    }

    async fn kids_recipe(&self, _member: FamilyMember) -> Result<Recipe, GenerationError> {
        self.settle().await?;
        Ok(canned_recipe("Smiley-face pizza"))
    }

    async fn occasion_menu(
        &self,
        _members: Vec<FamilyMember>,
        _occasion: String,
        _date: NaiveDate,
    ) -> Result<MenuProposal, GenerationError> {
        self.settle().await?;
        Ok(canned_menu_proposal())
    }

    async fn optimize_inventory(
        &self,
        _ingredients: Vec<Ingredient>,
    ) -> Result<Recipe, GenerationError> {
        self.settle().await?;
        Ok(canned_recipe("Use-it-up gratin"))
    }

    async fn ingredient_recipe(
        &self,
        _ingredient: Ingredient,
        _member: FamilyMember,
    ) -> Result<Recipe, GenerationError> {
        self.settle().await?;
        Ok(canned_recipe("Carrot soup"))
    }

    async fn budget_menu(
        &self,
        _members: Vec<FamilyMember>,
        _budget: f64,
    ) -> Result<MenuProposal, GenerationError> {
        self.settle().await?;
        Ok(canned_menu_proposal())
    }

    async fn check_compatibility(
        &self,
        _recipe: Recipe,
        _members: Vec<FamilyMember>,
    ) -> Result<CompatibilityReport, GenerationError> {
        self.settle().await?;
        Ok(CompatibilityReport::compatible())
    }

    async fn diet_recipe(
        &self,
        _member: FamilyMember,
        _diet: String,
    ) -> Result<Recipe, GenerationError> {
        self.settle().await?;
        Ok(canned_recipe("Keto salad"))
    }

    async fn balanced_daily_menu(
        &self,
        _member: FamilyMember,
        _date: NaiveDate,
    ) -> Result<MenuProposal, GenerationError> {
        self.settle().await?;
        Ok(canned_menu_proposal())
    }

    async fn recipe_from_image(
        &self,
        _image_url: String,
        _member: FamilyMember,
    ) -> Result<Recipe, GenerationError> {
        self.settle().await?;
        Ok(canned_recipe("Reconstructed tart"))
    }

    async fn leftover_recipe(
        &self,
        _ingredients: Vec<Ingredient>,
    ) -> Result<Recipe, GenerationError> {
        self.settle().await?;
        Ok(canned_recipe("Leftover fried rice"))
    }

    async fn guest_recipe(
        &self,
        _members: Vec<FamilyMember>,
        _guest_count: u32,
    ) -> Result<Recipe, GenerationError> {
        self.settle().await?;
        Ok(canned_recipe("Crowd-size paella"))
    }

    async fn ingredient_availability(
        &self,
        name: String,
        _location: GeoPoint,
    ) -> Result<AvailabilityReport, GenerationError> {
        self.settle().await?;
        Ok(AvailabilityReport::new(
            vec![Store::new("Green Market", "12 Elm St").with_distance_km(1.2)],
            vec![IngredientAvailability::available_at(name, "Green Market")],
        ))
    }

    async fn nutritional_info(&self, _query: String) -> Result<RecipeAnalysis, GenerationError> {
        self.settle().await?;
        Ok(RecipeAnalysis::new(0.0, "Rich in iron and folate"))
    }

    async fn troubleshoot(&self, _query: String) -> Result<String, GenerationError> {
        self.settle().await?;
        Ok("Let the dough rest longer".to_owned())
    }

    async fn creative_ideas(&self, _query: String) -> Result<Vec<Idea>, GenerationError> {
        self.settle().await?;
        Ok(vec![Idea::new("Taco night", "Build-your-own tacos")])
    }

    async fn food_trends(
        &self,
        _members: Vec<FamilyMember>,
    ) -> Result<Vec<FoodTrend>, GenerationError> {
        self.settle().await?;
        Ok(vec![FoodTrend::new(
            "t1",
            "Fermentation",
            "Home pickling is back",
            0.8,
        )])
    }
}

/// A well-formed value for any collectable field
pub fn sample_value(key: FieldKey) -> FieldValue {
    match key {
        FieldKey::Member => FieldValue::Member(FamilyMember::new("Ana", 34)),
        FieldKey::Members => FieldValue::Members(vec![
            FamilyMember::new("Ana", 34),
            FamilyMember::new("Leo", 8),
        ]),
        FieldKey::Ingredient => {
            FieldValue::Ingredient(Ingredient::new("carrot", 3.0, Unit::Pieces))
        }
        FieldKey::Ingredients => FieldValue::Ingredients(vec![
            Ingredient::new("carrot", 3.0, Unit::Pieces),
            Ingredient::new("rice", 200.0, Unit::Grams),
        ]),
        FieldKey::IngredientName => FieldValue::Text("saffron".into()),
        FieldKey::Recipe => FieldValue::Recipe(canned_recipe("Ratatouille")),
        FieldKey::Menu => FieldValue::Menu(Menu::new("Week 1", "First week")),
        FieldKey::MealHistory => FieldValue::Meals(vec![MealRecord::new(
            Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap(),
            MealType::Lunch,
            "Chicken salad",
        )]),
        FieldKey::Date => {
            FieldValue::Date(NaiveDate::from_ymd_opt(2025, 7, 14).unwrap())
        }
        FieldKey::DateStart => {
            FieldValue::Date(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap())
        }
        FieldKey::Month => FieldValue::Text("2025-07".into()),
        FieldKey::BudgetLimit => FieldValue::Amount(200.0),
        FieldKey::Budget => FieldValue::Amount(150.0),
        FieldKey::Occasion => FieldValue::Text("birthday".into()),
        FieldKey::Diet => FieldValue::Text("vegetarian".into()),
        FieldKey::Query => FieldValue::Text("how much iron is in spinach".into()),
        FieldKey::ImageUrl => FieldValue::Text("https://example.com/dish.jpg".into()),
        FieldKey::Location => FieldValue::Location(GeoPoint::new(48.85, 2.35)),
        FieldKey::GuestCount => FieldValue::Count(8),
        FieldKey::Preferences => FieldValue::Preferences(
            RecipePreferences::new(SpiceLevel::Medium)
                .with_cuisine("thai")
                .with_meal_type(MealType::Dinner),
        ),
    }
}
