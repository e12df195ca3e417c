use sea_orm::{entity::prelude::*, DatabaseConnection, IntoActiveModel, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Upper bound on a category label, matching the column width.
pub const CATEGORY_MAX_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_a: Option<String>,
    pub category_b: Option<String>,
    pub category_c: Option<String>,
    pub price_cents: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Price in currency units.
    pub fn price(&self) -> f64 {
        cents_to_price(self.price_cents)
    }
}

pub fn cents_to_price(cents: i32) -> f64 {
    f64::from(cents) / 100.0
}

/// Convert a currency amount to whole cents, rounding half away from zero.
pub fn cents_from_price(price: f64) -> Result<i32, ModelError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ModelError::Validation("price must be a non-negative number".into()));
    }
    let cents = (price * 100.0).round();
    if cents > f64::from(i32::MAX) {
        return Err(ModelError::Validation("price too large".into()));
    }
    Ok(cents as i32)
}

pub fn validate_category(field: &str, value: Option<&str>) -> Result<(), ModelError> {
    let Some(v) = value else { return Ok(()) };
    if v.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} must not be blank")));
    }
    if v.chars().count() > CATEGORY_MAX_LEN {
        return Err(ModelError::Validation(format!("{field} longer than {CATEGORY_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_price_cents(cents: i32) -> Result<(), ModelError> {
    if cents < 0 {
        return Err(ModelError::Validation("price_cents must be >= 0".into()));
    }
    Ok(())
}

/// Fields for a product that does not exist yet; the id is generated on insert.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewProduct {
    pub category_a: Option<String>,
    pub category_b: Option<String>,
    pub category_c: Option<String>,
    pub price_cents: i32,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_category("category_a", self.category_a.as_deref())?;
        validate_category("category_b", self.category_b.as_deref())?;
        validate_category("category_c", self.category_c.as_deref())?;
        validate_price_cents(self.price_cents)
    }
}

impl IntoActiveModel<ActiveModel> for NewProduct {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            category_a: Set(self.category_a),
            category_b: Set(self.category_b),
            category_c: Set(self.category_c),
            price_cents: Set(self.price_cents),
        }
    }
}

pub async fn create(db: &DatabaseConnection, new: NewProduct) -> Result<Model, ModelError> {
    new.validate()?;
    new.into_active_model().insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
