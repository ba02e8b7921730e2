use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use periodcost_core::{MenuItemId, PortionId};
use periodcost_recipes::Recipe;

/// Predicted and settled cost of one sold portion within a period.
///
/// Costs are per portion; `quantity` is how many portions were sold. Created
/// by the engine when a sale is recorded and written once more at settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostAllocationEntry {
    name: String,
    portion_id: PortionId,
    menu_item_id: MenuItemId,
    portion_name: String,
    cost_prediction: Decimal,
    cost: Decimal,
    quantity: Decimal,
    settled: bool,
}

impl CostAllocationEntry {
    pub(crate) fn predicted(
        recipe: &Recipe,
        menu_item_name: &str,
        cost_prediction: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            name: menu_item_name.to_string(),
            portion_id: recipe.portion.id,
            menu_item_id: recipe.portion.menu_item_id,
            portion_name: recipe.portion.name.clone(),
            cost_prediction,
            cost: cost_prediction,
            quantity,
            settled: false,
        }
    }

    pub(crate) fn settle(&mut self, cost: Decimal) {
        self.cost = cost;
        self.settled = true;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn portion_id(&self) -> PortionId {
        self.portion_id
    }

    pub fn menu_item_id(&self) -> MenuItemId {
        self.menu_item_id
    }

    pub fn portion_name(&self) -> &str {
        &self.portion_name
    }

    /// Per-portion cost computed at sale time from opening unit costs.
    pub fn cost_prediction(&self) -> Decimal {
        self.cost_prediction
    }

    /// Per-portion settled cost; equals the prediction until settlement.
    pub fn cost(&self) -> Decimal {
        self.cost
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn total_predicted_cost(&self) -> Decimal {
        self.cost_prediction * self.quantity
    }

    pub fn total_settled_cost(&self) -> Decimal {
        self.cost * self.quantity
    }
}
