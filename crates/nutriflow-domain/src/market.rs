//! Stores, availability, and budget planning.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A geographic coordinate pair used for store lookups
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a coordinate pair
    #[inline]
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A grocery store known to the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    /// Distance from the query location, when known
    pub distance_km: Option<f64>,
}

impl Store {
    /// Create a store with no distance information
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: address.into(),
            distance_km: None,
        }
    }

    /// Set the distance from the query location
    #[inline]
    #[must_use]
    pub fn with_distance_km(mut self, distance: f64) -> Self {
        self.distance_km = Some(distance);
        self
    }
}

/// Availability of one ingredient at nearby stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientAvailability {
    pub name: String,
    pub available: bool,
    /// Store carrying the ingredient, if any
    pub store: Option<String>,
}

impl IngredientAvailability {
    /// Mark an ingredient as available at a store
    #[inline]
    #[must_use]
    pub fn available_at(name: impl Into<String>, store: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
            store: Some(store.into()),
        }
    }

    /// Mark an ingredient as unavailable
    #[inline]
    #[must_use]
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: false,
            store: None,
        }
    }
}

/// One budget line in a monthly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAllocation {
    pub label: String,
    pub amount: f64,
}

impl MealAllocation {
    /// Create a budget line
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// A generated monthly meal budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    /// Spending ceiling requested by the user
    pub limit: f64,
    /// Target month, `YYYY-MM`
    pub month: String,
    #[serde(default)]
    pub meal_allocations: Vec<MealAllocation>,
    pub estimated_total: f64,
}

impl BudgetPlan {
    /// Create an empty plan for a month
    #[inline]
    #[must_use]
    pub fn new(limit: f64, month: impl Into<String>) -> Self {
        Self {
            limit,
            month: month.into(),
            meal_allocations: Vec::new(),
            estimated_total: 0.0,
        }
    }

    /// Add a budget line and update the estimated total
    #[inline]
    #[must_use]
    pub fn with_allocation(mut self, allocation: MealAllocation) -> Self {
        self.estimated_total += allocation.amount;
        self.meal_allocations.push(allocation);
        self
    }

    /// Whether the plan stays within the requested limit
    #[inline]
    #[must_use]
    pub fn within_limit(&self) -> bool {
        self.estimated_total <= self.limit
    }
}
