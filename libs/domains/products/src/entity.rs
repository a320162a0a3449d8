use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text", unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: f64,
    pub in_stock: bool,
    #[sea_orm(column_type = "Text")]
    pub category: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Product
impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            in_stock: model.in_stock,
            category: model.category,
        }
    }
}

// Conversion from input DTO to an ActiveModel for insertion.
// The id stays NotSet so the database assigns it.
impl From<crate::models::ProductInput> for ActiveModel {
    fn from(input: crate::models::ProductInput) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            in_stock: Set(input.in_stock),
            category: Set(input.category),
        }
    }
}

/// Build an ActiveModel that fully replaces the row with the given id
pub fn replacement_model(id: i32, input: crate::models::ProductInput) -> ActiveModel {
    ActiveModel {
        id: Set(id),
        name: Set(input.name),
        description: Set(input.description),
        price: Set(input.price),
        in_stock: Set(input.in_stock),
        category: Set(input.category),
    }
}
