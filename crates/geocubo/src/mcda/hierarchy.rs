use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::domain::{Category, CategoryId, Parameter, ParameterId, ParameterLookup};

/// Weights are percentages; totals within this distance of 100 count as balanced.
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// Immutable category/parameter table the engine scores against.
///
/// Weight balance is not enforced here. A hierarchy whose weights drift from 100 still
/// scores (proportionally skewed); [`McdaHierarchy::weight_report`] is how callers find out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McdaHierarchy {
    categories: Vec<Category>,
}

/// On-disk and over-the-wire shape of a hierarchy definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HierarchyDocument {
    pub categories: Vec<Category>,
}

impl McdaHierarchy {
    pub fn new(categories: Vec<Category>) -> Self {
        let categories = categories
            .into_iter()
            .map(|mut category| {
                for parameter in &mut category.parameters {
                    parameter.category_id = category.id.clone();
                }
                category
            })
            .collect();
        Self { categories }
    }

    /// Built-in Context / Property / Market / Profitability table.
    pub fn standard() -> Self {
        Self::new(vec![
            Category::new("context", "Context", 25.0)
                .with_parameter(
                    Parameter::new("distance_towns", "Distance to Nearest Town(s)/Villages", 25.0)
                        .with_description("Distance to population centers and their size")
                        .with_criteria(
                            "Closer distance to larger towns (more potential users) = higher score",
                        ),
                )
                .with_parameter(
                    Parameter::new("neighborhood_control", "Neighborhood Control", 25.0)
                        .with_description("Public vs. Private Ownership, Zoning Restrictions")
                        .with_criteria("Private ownership with flexible zoning = higher score"),
                )
                .with_parameter(
                    Parameter::new("topography", "Topography", 25.0)
                        .with_description("Terrain and Natural Features")
                        .with_criteria(
                            "Flat land with minimal environmental restrictions = higher score",
                        ),
                )
                .with_parameter(
                    Parameter::new(
                        "infrastructure_connections",
                        "Infrastructure Connections",
                        25.0,
                    )
                    .with_description("Access to Roads, Utilities")
                    .with_criteria("Direct access to paved roads, utilities = higher score"),
                ),
            Category::new("property", "Property", 25.0)
                .with_parameter(
                    Parameter::new("land_capacity", "Land Capacity (Size)", 50.0)
                        .with_description("Total Area of the Property")
                        .with_criteria(
                            "Larger land size offers more development options = higher score \
                             (consider diminishing returns for excessively large areas)",
                        ),
                )
                .with_parameter(
                    Parameter::new("site_analysis", "Site Analysis", 50.0)
                        .with_description(
                            "Existing Structures, Vegetation, Historical Significance",
                        )
                        .with_criteria(
                            "Existing structures that can be repurposed = positive factor. \
                             Valuable vegetation or historical landmarks might require \
                             preservation, impacting development options (consider score deduction)",
                        ),
                ),
            Category::new("market", "Market", 25.0)
                .with_parameter(
                    Parameter::new(
                        "population_composition",
                        "Population Composition & Growth",
                        25.0,
                    )
                    .with_description("Age, Income Level, Growth Trends")
                    .with_criteria(
                        "Younger population with higher disposable income and positive growth \
                         trends = higher score",
                    ),
                )
                .with_parameter(
                    Parameter::new("purchasing_power", "Purchasing Power", 25.0)
                        .with_description("Ability of Local Population to Afford Development")
                        .with_criteria(
                            "Strong purchasing power in the target demographic = higher score",
                        ),
                )
                .with_parameter(
                    Parameter::new(
                        "existing_market_offerings",
                        "Existing Market Offerings",
                        25.0,
                    )
                    .with_description("Products & Prices of Similar Developments")
                    .with_criteria(
                        "Lack of similar developments in the area creates higher demand = \
                         positive factor. Existing, successful developments with similar \
                         offerings might indicate market saturation (consider score deduction)",
                    ),
                )
                .with_parameter(
                    Parameter::new("absorption_rates", "Absorption Rates", 25.0)
                        .with_description("Speed at Which Similar Developments Sell")
                        .with_criteria(
                            "Faster absorption rates for similar developments indicate strong \
                             market demand = higher score",
                        ),
                ),
            Category::new("profitability", "Profitability", 25.0)
                .with_parameter(
                    Parameter::new("revaluation_potential", "Revaluation Potential", 34.0)
                        .with_description("Projected Increase in Land Value After Development")
                        .with_criteria(
                            "Development plan with high potential for increased land value = \
                             higher score",
                        ),
                )
                .with_parameter(
                    Parameter::new("capital_requirement", "Capital Requirement", 33.0)
                        .with_description("Investment Needed for Development")
                        .with_criteria("Lower upfront investment costs = higher score"),
                )
                .with_parameter(
                    Parameter::new(
                        "inventory_consumption_time",
                        "Inventory Consumption Time",
                        33.0,
                    )
                    .with_description("Estimated Time to Sell Developed Units")
                    .with_criteria("Faster sales velocity for developed units = higher score"),
                ),
        ])
    }

    /// Parse a `{ "categories": [...] }` document.
    pub fn from_json_str(raw: &str) -> Result<Self, HierarchyError> {
        let document: HierarchyDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HierarchyError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| HierarchyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Structural checks for externally supplied tables. Weight totals are left to
    /// [`McdaHierarchy::weight_report`].
    pub fn from_document(document: HierarchyDocument) -> Result<Self, HierarchyError> {
        if document.categories.is_empty() {
            return Err(HierarchyError::Empty);
        }

        let mut seen = HashSet::new();
        for category in &document.categories {
            for parameter in &category.parameters {
                if !seen.insert(parameter.id.clone()) {
                    return Err(HierarchyError::DuplicateParameter(parameter.id.clone()));
                }
            }
        }

        Ok(Self::new(document.categories))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.id.as_str() == id)
    }

    pub fn parameter_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.parameters.len())
            .sum()
    }

    pub fn parameter_ids(&self) -> impl Iterator<Item = &ParameterId> {
        self.categories
            .iter()
            .flat_map(|category| category.parameters.iter().map(|parameter| &parameter.id))
    }

    /// First parameter with a matching id, with its owning category for display.
    pub fn parameter_by_id(&self, id: &str) -> Option<ParameterLookup> {
        self.categories.iter().find_map(|category| {
            category
                .parameters
                .iter()
                .find(|parameter| parameter.id.as_str() == id)
                .map(|parameter| ParameterLookup {
                    parameter: parameter.clone(),
                    category_id: category.id.clone(),
                    category_name: category.name.clone(),
                })
        })
    }

    pub fn category_weight_total(&self) -> f64 {
        self.categories.iter().map(|category| category.weight).sum()
    }

    /// True when the category weights add up to 100.
    pub fn validate_category_weights(&self) -> bool {
        is_balanced(self.category_weight_total())
    }

    /// Per category, whether its parameter weights add up to 100.
    pub fn validate_parameter_weights(&self) -> BTreeMap<CategoryId, bool> {
        self.categories
            .iter()
            .map(|category| {
                (
                    category.id.clone(),
                    is_balanced(category.parameter_weight_total()),
                )
            })
            .collect()
    }

    pub fn weight_report(&self) -> WeightReport {
        let categories = self
            .categories
            .iter()
            .map(|category| {
                let parameter_weight_total = category.parameter_weight_total();
                CategoryWeightCheck {
                    category_id: category.id.clone(),
                    category_name: category.name.clone(),
                    weight: category.weight,
                    parameter_weight_total,
                    balanced: is_balanced(parameter_weight_total),
                }
            })
            .collect();

        WeightReport {
            category_weight_total: self.category_weight_total(),
            categories_balanced: self.validate_category_weights(),
            parameters_balanced: self.validate_parameter_weights(),
            categories,
        }
    }
}

impl Default for McdaHierarchy {
    fn default() -> Self {
        Self::standard()
    }
}

fn is_balanced(total: f64) -> bool {
    (total - 100.0).abs() < WEIGHT_TOLERANCE
}

/// Advisory diagnostic covering both weight validators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightReport {
    pub category_weight_total: f64,
    pub categories_balanced: bool,
    pub parameters_balanced: BTreeMap<CategoryId, bool>,
    pub categories: Vec<CategoryWeightCheck>,
}

impl WeightReport {
    pub fn is_consistent(&self) -> bool {
        self.categories_balanced && self.parameters_balanced.values().all(|balanced| *balanced)
    }

    pub fn unbalanced_categories(&self) -> impl Iterator<Item = &CategoryWeightCheck> {
        self.categories.iter().filter(|check| !check.balanced)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWeightCheck {
    pub category_id: CategoryId,
    pub category_name: String,
    pub weight: f64,
    pub parameter_weight_total: f64,
    pub balanced: bool,
}

/// Rejected hierarchy definitions.
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("unable to read hierarchy from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed hierarchy document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("hierarchy must define at least one category")]
    Empty,
    #[error("parameter id '{0}' is declared more than once")]
    DuplicateParameter(ParameterId),
}
