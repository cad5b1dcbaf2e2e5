//! Fill simulation.
//!
//! Orders fill at the signal price. Commission is proportional:
//! commission = quantity × price × transaction_cost. Quantities are whole
//! units only.

use super::position::Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub quantity: f64,
    pub price: f64,
    /// quantity × price, before commission.
    pub value: f64,
    pub commission: f64,
}

impl Fill {
    fn new(quantity: f64, price: f64, transaction_cost: f64) -> Self {
        let value = quantity * price;
        Fill {
            quantity,
            price,
            value,
            commission: calculate_commission(value, transaction_cost),
        }
    }
}

pub fn calculate_commission(trade_value: f64, transaction_cost: f64) -> f64 {
    trade_value * transaction_cost
}

/// Largest whole quantity whose cost plus commission fits in `cash`:
/// floor(cash / (price × (1 + transaction_cost))).
pub fn affordable_quantity(cash: f64, price: f64, transaction_cost: f64) -> f64 {
    if cash <= 0.0 || price <= 0.0 {
        return 0.0;
    }
    let mut quantity = (cash / (price * (1.0 + transaction_cost))).floor();
    // the division can round up across an integer boundary
    while quantity > 0.0 {
        let fill = Fill::new(quantity, price, transaction_cost);
        if fill.value + fill.commission <= cash {
            break;
        }
        quantity = step_down(quantity);
    }
    quantity
}

/// Next whole quantity below `quantity`. Above 2^53 `quantity - 1.0` rounds
/// back to `quantity`, so the step is at least one ulp.
fn step_down(quantity: f64) -> f64 {
    let below = f64::from_bits(quantity.to_bits() - 1);
    (quantity - 1.0).min(below).floor()
}

/// Buys as many whole units as `cash` affords; `None` when not even one.
pub fn buy(cash: f64, price: f64, transaction_cost: f64) -> Option<Fill> {
    let quantity = affordable_quantity(cash, price, transaction_cost);
    if quantity > 0.0 {
        Some(Fill::new(quantity, price, transaction_cost))
    } else {
        None
    }
}

/// Sells the whole position.
pub fn sell(position: &Position, price: f64, transaction_cost: f64) -> Fill {
    Fill::new(position.quantity, price, transaction_cost)
}
