//! Declarative step resolution.
//!
//! Each flow owns an ordered list of [`StepSpec`]s. Resolution scans the
//! list and returns the first step whose predicate still fires; when none
//! fires, the flow is terminal. The same table answers both "what is the
//! next step" and "is this flow finished", so the two can never drift apart.
//!
//! Resolution is pure: the same `(flow, context)` pair always yields the
//! same answer.

use std::collections::HashMap;

use crate::context::{FieldKey, FieldValue, FlowContext};
use crate::error::FlowError;
use crate::types::{FlowId, StepKind};

/// Identifies the next data-collection capability to present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Which widget capability satisfies the step
    pub kind: StepKind,
    /// The context field the step populates
    pub key: FieldKey,
    /// Submitting this step ends the flow
    pub terminal: bool,
}

/// Predicate deciding whether a step is still needed for a given context
pub type StepPredicate = fn(&FlowContext) -> bool;

/// One entry in a flow's step table
#[derive(Debug, Clone, Copy)]
pub struct StepSpec {
    key: FieldKey,
    kind: StepKind,
    terminal: bool,
    /// None means the default predicate: the key is absent from the context
    needed: Option<StepPredicate>,
}

impl StepSpec {
    /// A non-terminal step, needed while its key is absent
    #[inline]
    #[must_use]
    pub fn collect(key: FieldKey, kind: StepKind) -> Self {
        Self {
            key,
            kind,
            terminal: false,
            needed: None,
        }
    }

    /// A non-terminal step gated by a custom predicate
    #[inline]
    #[must_use]
    pub fn collect_if(key: FieldKey, kind: StepKind, needed: StepPredicate) -> Self {
        Self {
            key,
            kind,
            terminal: false,
            needed: Some(needed),
        }
    }

    /// The terminal step of a flow, needed while its key is absent
    #[inline]
    #[must_use]
    pub fn finish_with(key: FieldKey, kind: StepKind) -> Self {
        Self {
            key,
            kind,
            terminal: true,
            needed: None,
        }
    }

    /// The field the step populates
    #[inline]
    #[must_use]
    pub fn key(&self) -> FieldKey {
        self.key
    }

    /// Whether this step ends the flow
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn is_needed(&self, context: &FlowContext) -> bool {
        match self.needed {
            Some(predicate) => predicate(context),
            None => !context.contains(self.key),
        }
    }

    fn descriptor(&self) -> StepDescriptor {
        StepDescriptor {
            kind: self.kind,
            key: self.key,
            terminal: self.terminal,
        }
    }
}

/// Outcome of resolving a flow against its context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResolution {
    /// Present this step next
    Step(StepDescriptor),
    /// Every required field is collected; dispatch now
    Terminal,
}

/// The step tables for every supported flow.
///
/// Adding a flow is a data change here plus a dispatch entry, not a
/// control-flow edit.
#[derive(Debug, Clone)]
pub struct FlowTable {
    flows: HashMap<FlowId, Vec<StepSpec>>,
}

impl Default for FlowTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl FlowTable {
    /// A table with no flows registered
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            flows: HashMap::new(),
        }
    }

    /// Register or replace a flow's step list
    pub fn insert_flow(&mut self, flow: FlowId, specs: Vec<StepSpec>) {
        self.flows.insert(flow, specs);
    }

    /// The step list for a flow, if registered
    #[inline]
    #[must_use]
    pub fn specs(&self, flow: FlowId) -> Option<&[StepSpec]> {
        self.flows.get(&flow).map(Vec::as_slice)
    }

    /// Next step for `(flow, context)`, or terminal.
    ///
    /// An unregistered flow, or a step list with no terminal entry, is a
    /// configuration defect and fails loudly.
    pub fn resolve(
        &self,
        flow: FlowId,
        context: &FlowContext,
    ) -> Result<StepResolution, FlowError> {
        let specs = self
            .flows
            .get(&flow)
            .ok_or(FlowError::UnsupportedFlow(flow))?;
        if !specs.iter().any(StepSpec::is_terminal) {
            return Err(FlowError::NoTerminalStep(flow));
        }
        for spec in specs {
            if spec.is_needed(context) {
                return Ok(StepResolution::Step(spec.descriptor()));
            }
        }
        Ok(StepResolution::Terminal)
    }

    /// The full standard flow catalog
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::empty();

        table.insert_flow(
            FlowId::RecipePersonalized,
            vec![StepSpec::finish_with(
                FieldKey::Member,
                StepKind::SelectMember,
            )],
        );
        table.insert_flow(
            FlowId::WeeklyMenu,
            vec![
                StepSpec::collect(FieldKey::Members, StepKind::SelectMembers),
                StepSpec::finish_with(FieldKey::DateStart, StepKind::SelectDate),
            ],
        );
        table.insert_flow(
            FlowId::ShoppingList,
            vec![
                StepSpec::collect(FieldKey::Menu, StepKind::SelectMenu),
                StepSpec::finish_with(FieldKey::Ingredients, StepKind::SelectIngredients),
            ],
        );
        table.insert_flow(
            FlowId::RecipeNutritionAnalysis,
            vec![StepSpec::finish_with(
                FieldKey::Recipe,
                StepKind::SelectRecipe,
            )],
        );
        table.insert_flow(
            FlowId::RecipeSuggestion,
            vec![
                StepSpec::collect(FieldKey::Ingredients, StepKind::SelectIngredients),
                StepSpec::finish_with(FieldKey::Preferences, StepKind::SelectPreferences),
            ],
        );
        table.insert_flow(
            FlowId::QuickRecipe,
            vec![StepSpec::finish_with(
                FieldKey::Member,
                StepKind::SelectMember,
            )],
        );
        table.insert_flow(
            FlowId::BudgetPlanning,
            vec![
                StepSpec::collect(FieldKey::BudgetLimit, StepKind::SelectBudget),
                StepSpec::finish_with(FieldKey::Month, StepKind::SelectMonth),
            ],
        );
        table.insert_flow(
            FlowId::StoreSuggestion,
            vec![StepSpec::finish_with(
                FieldKey::Ingredient,
                StepKind::SelectIngredient,
            )],
        );
        table.insert_flow(
            FlowId::MealAnalysis,
            vec![
                StepSpec::collect(FieldKey::Member, StepKind::SelectMember),
                StepSpec::finish_with(FieldKey::MealHistory, StepKind::SelectMealHistory),
            ],
        );
        table.insert_flow(
            FlowId::KidsRecipe,
            vec![StepSpec::finish_with(
                FieldKey::Member,
                StepKind::SelectMember,
            )],
        );
        // The occasion is asked only when no usable one was seeded; a
        // blank seed counts as missing and goes back to the occasion step.
        table.insert_flow(
            FlowId::SpecialOccasionMenu,
            vec![
                StepSpec::collect(FieldKey::Members, StepKind::SelectMembers),
                StepSpec::collect_if(FieldKey::Occasion, StepKind::SelectOccasion, |context| {
                    match context.get(FieldKey::Occasion) {
                        Some(FieldValue::Text(occasion)) => occasion.trim().is_empty(),
                        Some(_) => false,
                        None => true,
                    }
                }),
                StepSpec::finish_with(FieldKey::Date, StepKind::SelectDate),
            ],
        );
        table.insert_flow(
            FlowId::InventoryOptimization,
            vec![StepSpec::finish_with(
                FieldKey::Ingredients,
                StepKind::SelectIngredients,
            )],
        );
        table.insert_flow(
            FlowId::IngredientBasedRecipe,
            vec![
                StepSpec::collect(FieldKey::Member, StepKind::SelectMember),
                StepSpec::finish_with(FieldKey::Ingredient, StepKind::SelectIngredient),
            ],
        );
        table.insert_flow(
            FlowId::BudgetMenu,
            vec![
                StepSpec::collect(FieldKey::Members, StepKind::SelectMembers),
                StepSpec::finish_with(FieldKey::Budget, StepKind::SelectBudget),
            ],
        );
        table.insert_flow(
            FlowId::RecipeCompatibility,
            vec![
                StepSpec::collect(FieldKey::Members, StepKind::SelectMembers),
                StepSpec::finish_with(FieldKey::Recipe, StepKind::SelectRecipe),
            ],
        );
        table.insert_flow(
            FlowId::SpecificDietRecipe,
            vec![
                StepSpec::collect(FieldKey::Member, StepKind::SelectMember),
                StepSpec::finish_with(FieldKey::Diet, StepKind::SelectDiet),
            ],
        );
        table.insert_flow(
            FlowId::BalancedDailyMenu,
            vec![
                StepSpec::collect(FieldKey::Member, StepKind::SelectMember),
                StepSpec::finish_with(FieldKey::Date, StepKind::SelectDate),
            ],
        );
        table.insert_flow(
            FlowId::RecipeFromImage,
            vec![
                StepSpec::collect(FieldKey::Member, StepKind::SelectMember),
                StepSpec::finish_with(FieldKey::ImageUrl, StepKind::SelectImage),
            ],
        );
        table.insert_flow(
            FlowId::LeftoverRecipe,
            vec![StepSpec::finish_with(
                FieldKey::Ingredients,
                StepKind::SelectIngredients,
            )],
        );
        table.insert_flow(
            FlowId::GuestRecipe,
            vec![
                StepSpec::collect(FieldKey::Members, StepKind::SelectMembers),
                StepSpec::finish_with(FieldKey::GuestCount, StepKind::SelectGuestCount),
            ],
        );
        table.insert_flow(
            FlowId::IngredientAvailability,
            vec![
                StepSpec::collect(FieldKey::IngredientName, StepKind::SelectIngredient),
                StepSpec::finish_with(FieldKey::Location, StepKind::SelectLocation),
            ],
        );
        table.insert_flow(
            FlowId::NutritionalInfo,
            vec![StepSpec::finish_with(
                FieldKey::Query,
                StepKind::FreeTextQuery,
            )],
        );
        table.insert_flow(
            FlowId::TroubleshootProblem,
            vec![StepSpec::finish_with(
                FieldKey::Query,
                StepKind::FreeTextQuery,
            )],
        );
        table.insert_flow(
            FlowId::CreativeIdeas,
            vec![StepSpec::finish_with(
                FieldKey::Query,
                StepKind::FreeTextQuery,
            )],
        );
        table.insert_flow(
            FlowId::FoodTrendAnalysis,
            vec![StepSpec::finish_with(
                FieldKey::Members,
                StepKind::SelectMembers,
            )],
        );

        table
    }
}
