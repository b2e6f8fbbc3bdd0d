//! Classification and vehicle models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Classification {
    pub classification_id: i64,
    pub classification_name: String,
}

/// An inventory row joined with its classification name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Vehicle {
    pub inv_id: i64,
    pub inv_make: String,
    pub inv_model: String,
    pub inv_year: i64,
    pub inv_description: String,
    pub inv_image: String,
    pub inv_thumbnail: String,
    pub inv_price: f64,
    pub inv_miles: i64,
    pub inv_color: String,
    pub classification_id: i64,
    pub classification_name: String,
}

impl Vehicle {
    /// "Make Model"
    pub fn name(&self) -> String {
        format!("{} {}", self.inv_make, self.inv_model)
    }

    /// Whole dollars with thousands separators, e.g. "$25,000"
    pub fn price_label(&self) -> String {
        format!("${}", group_thousands(self.inv_price.round() as i64))
    }

    pub fn miles_label(&self) -> String {
        group_thousands(self.inv_miles)
    }
}

/// Validated insert/update payload for the inventory table.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleInput {
    pub classification_id: i64,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub description: String,
    pub image: String,
    pub thumbnail: String,
    pub price: f64,
    pub miles: i64,
    pub color: String,
}

impl VehicleInput {
    pub fn name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}
