//! The accumulating key/value store for one in-progress flow.
//!
//! A [`FlowContext`] is created when a flow starts, grows with each submitted
//! step, and is discarded in full at dispatch, error, or cancellation. Keys
//! are a closed enum so resolver tables and dispatch requirements stay
//! type-checked against each other.

use chrono::NaiveDate;
use nutriflow_domain::{
    FamilyMember, GeoPoint, Ingredient, MealRecord, Menu, Recipe, RecipePreferences,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::DispatchError;

/// Field names a collection step may populate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Member,
    Members,
    Ingredient,
    Ingredients,
    IngredientName,
    Recipe,
    Menu,
    MealHistory,
    Date,
    DateStart,
    Month,
    BudgetLimit,
    Budget,
    Occasion,
    Diet,
    Query,
    ImageUrl,
    Location,
    GuestCount,
    Preferences,
}

impl FieldKey {
    /// Stable snake_case name, matching the serialized form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Members => "members",
            Self::Ingredient => "ingredient",
            Self::Ingredients => "ingredients",
            Self::IngredientName => "ingredient_name",
            Self::Recipe => "recipe",
            Self::Menu => "menu",
            Self::MealHistory => "meal_history",
            Self::Date => "date",
            Self::DateStart => "date_start",
            Self::Month => "month",
            Self::BudgetLimit => "budget_limit",
            Self::Budget => "budget",
            Self::Occasion => "occasion",
            Self::Diet => "diet",
            Self::Query => "query",
            Self::ImageUrl => "image_url",
            Self::Location => "location",
            Self::GuestCount => "guest_count",
            Self::Preferences => "preferences",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collected value, heterogeneous across step kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Member(FamilyMember),
    Members(Vec<FamilyMember>),
    Ingredient(Ingredient),
    Ingredients(Vec<Ingredient>),
    Recipe(Recipe),
    Menu(Menu),
    Meals(Vec<MealRecord>),
    Date(NaiveDate),
    Text(String),
    Amount(f64),
    Count(u32),
    Location(GeoPoint),
    Preferences(RecipePreferences),
}

impl FieldValue {
    /// Shape name used in wrong-type diagnostics
    #[inline]
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Member(_) => "member",
            Self::Members(_) => "members",
            Self::Ingredient(_) => "ingredient",
            Self::Ingredients(_) => "ingredients",
            Self::Recipe(_) => "recipe",
            Self::Menu(_) => "menu",
            Self::Meals(_) => "meals",
            Self::Date(_) => "date",
            Self::Text(_) => "text",
            Self::Amount(_) => "amount",
            Self::Count(_) => "count",
            Self::Location(_) => "location",
            Self::Preferences(_) => "preferences",
        }
    }
}

/// What one submitted collection step contributes to the context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepOutput {
    fields: Vec<(FieldKey, FieldValue)>,
}

impl StepOutput {
    /// An output contributing nothing (used for seeding-free starts)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// An output carrying a single field
    #[inline]
    #[must_use]
    pub fn single(key: FieldKey, value: FieldValue) -> Self {
        Self {
            fields: vec![(key, value)],
        }
    }

    /// Add another field
    #[inline]
    #[must_use]
    pub fn with(mut self, key: FieldKey, value: FieldValue) -> Self {
        self.fields.push((key, value));
        self
    }

    /// Whether the output carries no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn into_fields(self) -> Vec<(FieldKey, FieldValue)> {
        self.fields
    }
}

/// The accumulating store for one flow run.
///
/// Grow-only within a run: re-submitting a key overwrites its value, removal
/// never happens. Only the flow controller writes to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowContext {
    fields: HashMap<FieldKey, FieldValue>,
}

impl FlowContext {
    /// Create an empty context
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no field has been collected yet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of collected fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether a field has been collected
    #[inline]
    #[must_use]
    pub fn contains(&self, key: FieldKey) -> bool {
        self.fields.contains_key(&key)
    }

    /// Raw access to a collected value
    #[inline]
    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.fields.get(&key)
    }

    /// Set a field, overwriting any previous value.
    ///
    /// Inside the orchestrator only the flow controller writes to the
    /// active context.
    pub fn insert(&mut self, key: FieldKey, value: FieldValue) {
        self.fields.insert(key, value);
    }

    /// Merge a step's fields, overwriting on key collision
    pub fn merge(&mut self, output: StepOutput) {
        for (key, value) in output.into_fields() {
            self.insert(key, value);
        }
    }

    fn require(&self, key: FieldKey) -> Result<&FieldValue, DispatchError> {
        self.fields
            .get(&key)
            .ok_or(DispatchError::MissingField(key))
    }

    /// The selected single family member
    pub fn require_member(&self) -> Result<FamilyMember, DispatchError> {
        match self.require(FieldKey::Member)? {
            FieldValue::Member(member) => Ok(member.clone()),
            _ => Err(DispatchError::WrongFieldType {
                key: FieldKey::Member,
                expected: "member",
            }),
        }
    }

    /// The selected family members
    pub fn require_members(&self) -> Result<Vec<FamilyMember>, DispatchError> {
        match self.require(FieldKey::Members)? {
            FieldValue::Members(members) => Ok(members.clone()),
            _ => Err(DispatchError::WrongFieldType {
                key: FieldKey::Members,
                expected: "members",
            }),
        }
    }

    /// The selected single ingredient
    pub fn require_ingredient(&self) -> Result<Ingredient, DispatchError> {
        match self.require(FieldKey::Ingredient)? {
            FieldValue::Ingredient(ingredient) => Ok(ingredient.clone()),
            _ => Err(DispatchError::WrongFieldType {
                key: FieldKey::Ingredient,
                expected: "ingredient",
            }),
        }
    }

    /// The selected ingredient list
    pub fn require_ingredients(&self) -> Result<Vec<Ingredient>, DispatchError> {
        match self.require(FieldKey::Ingredients)? {
            FieldValue::Ingredients(ingredients) => Ok(ingredients.clone()),
            _ => Err(DispatchError::WrongFieldType {
                key: FieldKey::Ingredients,
                expected: "ingredients",
            }),
        }
    }

    /// The selected recipe
    pub fn require_recipe(&self) -> Result<Recipe, DispatchError> {
        match self.require(FieldKey::Recipe)? {
            FieldValue::Recipe(recipe) => Ok(recipe.clone()),
            _ => Err(DispatchError::WrongFieldType {
                key: FieldKey::Recipe,
                expected: "recipe",
            }),
        }
    }

    /// The selected menu
    pub fn require_menu(&self) -> Result<Menu, DispatchError> {
        match self.require(FieldKey::Menu)? {
            FieldValue::Menu(menu) => Ok(menu.clone()),
            _ => Err(DispatchError::WrongFieldType {
                key: FieldKey::Menu,
                expected: "menu",
            }),
        }
    }

    /// The selected meal history
    pub fn require_meal_history(&self) -> Result<Vec<MealRecord>, DispatchError> {
        match self.require(FieldKey::MealHistory)? {
            FieldValue::Meals(meals) => Ok(meals.clone()),
            _ => Err(DispatchError::WrongFieldType {
                key: FieldKey::MealHistory,
                expected: "meals",
            }),
        }
    }

    /// The selected location
    pub fn require_location(&self) -> Result<GeoPoint, DispatchError> {
        match self.require(FieldKey::Location)? {
            FieldValue::Location(point) => Ok(*point),
            _ => Err(DispatchError::WrongFieldType {
                key: FieldKey::Location,
                expected: "location",
            }),
        }
    }

    /// The selected guest count
    pub fn require_guest_count(&self) -> Result<u32, DispatchError> {
        match self.require(FieldKey::GuestCount)? {
            FieldValue::Count(count) => Ok(*count),
            _ => Err(DispatchError::WrongFieldType {
                key: FieldKey::GuestCount,
                expected: "count",
            }),
        }
    }

    /// The collected recipe preferences
    pub fn require_preferences(&self) -> Result<RecipePreferences, DispatchError> {
        match self.require(FieldKey::Preferences)? {
            FieldValue::Preferences(preferences) => Ok(preferences.clone()),
            _ => Err(DispatchError::WrongFieldType {
                key: FieldKey::Preferences,
                expected: "preferences",
            }),
        }
    }

    /// A text-valued field (query, month, occasion, diet, image url, name)
    pub fn require_text(&self, key: FieldKey) -> Result<String, DispatchError> {
        match self.require(key)? {
            FieldValue::Text(text) => Ok(text.clone()),
            _ => Err(DispatchError::WrongFieldType {
                key,
                expected: "text",
            }),
        }
    }

    /// A date-valued field
    pub fn require_date(&self, key: FieldKey) -> Result<NaiveDate, DispatchError> {
        match self.require(key)? {
            FieldValue::Date(date) => Ok(*date),
            _ => Err(DispatchError::WrongFieldType {
                key,
                expected: "date",
            }),
        }
    }

    /// An amount-valued field (budget limit, budget)
    pub fn require_amount(&self, key: FieldKey) -> Result<f64, DispatchError> {
        match self.require(key)? {
            FieldValue::Amount(amount) => Ok(*amount),
            _ => Err(DispatchError::WrongFieldType {
                key,
                expected: "amount",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_grow_only_with_overwrite() {
        let mut ctx = FlowContext::new();
        ctx.merge(StepOutput::single(
            FieldKey::Month,
            FieldValue::Text("2025-07".into()),
        ));
        ctx.merge(StepOutput::single(
            FieldKey::Month,
            FieldValue::Text("2025-08".into()),
        ));
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.require_text(FieldKey::Month).unwrap(), "2025-08");
    }

    #[test]
    fn missing_field_is_reported_by_key() {
        let ctx = FlowContext::new();
        match ctx.require_member() {
            Err(DispatchError::MissingField(FieldKey::Member)) => {}
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_reported() {
        let mut ctx = FlowContext::new();
        ctx.insert(FieldKey::Member, FieldValue::Text("not a member".into()));
        match ctx.require_member() {
            Err(DispatchError::WrongFieldType {
                key: FieldKey::Member,
                ..
            }) => {}
            other => panic!("expected WrongFieldType, got {other:?}"),
        }
    }

    #[test]
    fn multi_field_output_merges_atomically() {
        let mut ctx = FlowContext::new();
        ctx.merge(
            StepOutput::single(FieldKey::BudgetLimit, FieldValue::Amount(200.0))
                .with(FieldKey::Month, FieldValue::Text("2025-07".into())),
        );
        assert!(ctx.contains(FieldKey::BudgetLimit));
        assert!(ctx.contains(FieldKey::Month));
    }
}
