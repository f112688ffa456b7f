//! Analysis results and user preferences.

use serde::{Deserialize, Serialize};

/// One nutrient measurement inside a [`RecipeAnalysis`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientFact {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub unit: String,
}

impl NutrientFact {
    /// Create a nutrient measurement
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// Nutritional breakdown of a recipe or a meal history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeAnalysis {
    pub calories: f64,
    #[serde(default)]
    pub nutrients: Vec<NutrientFact>,
    pub description: String,
}

impl RecipeAnalysis {
    /// Create an analysis with no nutrient detail
    #[inline]
    #[must_use]
    pub fn new(calories: f64, description: impl Into<String>) -> Self {
        Self {
            calories,
            nutrients: Vec::new(),
            description: description.into(),
        }
    }

    /// Add a nutrient measurement
    #[inline]
    #[must_use]
    pub fn with_nutrient(mut self, nutrient: NutrientFact) -> Self {
        self.nutrients.push(nutrient);
        self
    }
}

/// Verdict on whether a recipe suits a set of family members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub compatible: bool,
    /// Reasons for incompatibility, empty when compatible
    #[serde(default)]
    pub reasons: Vec<String>,
    /// Substitutions or adjustments that would resolve the conflicts
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl CompatibilityReport {
    /// A fully compatible verdict
    #[inline]
    #[must_use]
    pub fn compatible() -> Self {
        Self {
            compatible: true,
            reasons: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// An incompatible verdict with reasons
    #[inline]
    #[must_use]
    pub fn incompatible(reasons: Vec<String>) -> Self {
        Self {
            compatible: false,
            reasons,
            recommendations: Vec::new(),
        }
    }

    /// Add a recommendation
    #[inline]
    #[must_use]
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }
}

/// A free-form creative suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub name: String,
    pub description: String,
}

impl Idea {
    /// Create an idea
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A food trend observed for a household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodTrend {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Popularity score, 0.0 to 1.0
    pub popularity: f64,
}

impl FoodTrend {
    /// Create a trend, clamping popularity into range
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        popularity: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            popularity: popularity.clamp(0.0, 1.0),
        }
    }
}

/// How spicy the user wants suggestions to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    None,
    Mild,
    Medium,
    Hot,
}

/// Preferences collected by the recipe-suggestion flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePreferences {
    pub spice_level: SpiceLevel,
    #[serde(default)]
    pub preferred_cuisines: Vec<String>,
    pub meal_type: Option<crate::MealType>,
}

impl RecipePreferences {
    /// Create preferences with a spice level only
    #[inline]
    #[must_use]
    pub fn new(spice_level: SpiceLevel) -> Self {
        Self {
            spice_level,
            preferred_cuisines: Vec::new(),
            meal_type: None,
        }
    }

    /// Add a preferred cuisine
    #[inline]
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.preferred_cuisines.push(cuisine.into());
        self
    }

    /// Set the targeted meal of the day
    #[inline]
    #[must_use]
    pub fn with_meal_type(mut self, meal_type: crate::MealType) -> Self {
        self.meal_type = Some(meal_type);
        self
    }
}
