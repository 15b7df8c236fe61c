//! Product entity for SeaORM.
//!
//! Bids, likes and comments are embedded in the row as JSONB arrays so a
//! product is always read and written as one document.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use agora_core::domain::{Product, ProductState};
use agora_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub owner_avatar: Option<String>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: f64,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: Option<DateTimeWithTimeZone>,
    pub product_image: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub bids: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub likes: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: Json,
    pub revision: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn from_json<T: serde::de::DeserializeOwned>(value: Json) -> Result<T, RepoError> {
    serde_json::from_value(value).map_err(|e| RepoError::Serialization(e.to_string()))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Json, RepoError> {
    serde_json::to_value(value).map_err(|e| RepoError::Serialization(e.to_string()))
}

pub(crate) fn to_revision(revision: u64) -> Result<i64, RepoError> {
    i64::try_from(revision).map_err(|e| RepoError::Serialization(e.to_string()))
}

/// Conversion from SeaORM Model to the domain aggregate.
impl TryFrom<Model> for Product {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let state = ProductState {
            id: model.id,
            owner_id: model.owner_id,
            owner_name: model.owner_name,
            owner_avatar: model.owner_avatar,
            title: model.title,
            description: model.description,
            price: model.price,
            start_date: model.start_date.with_timezone(&Utc),
            end_date: model.end_date.map(|date| date.with_timezone(&Utc)),
            product_image: model.product_image,
            bids: from_json(model.bids)?,
            likes: from_json(model.likes)?,
            comments: from_json(model.comments)?,
            revision: u64::try_from(model.revision)
                .map_err(|e| RepoError::Serialization(e.to_string()))?,
        };

        Ok(Product::from(state))
    }
}

/// Conversion from product state to a fully-set ActiveModel.
impl TryFrom<&ProductState> for ActiveModel {
    type Error = RepoError;

    fn try_from(state: &ProductState) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Set(state.id),
            owner_id: Set(state.owner_id),
            owner_name: Set(state.owner_name.clone()),
            owner_avatar: Set(state.owner_avatar.clone()),
            title: Set(state.title.clone()),
            description: Set(state.description.clone()),
            price: Set(state.price),
            start_date: Set(state.start_date.into()),
            end_date: Set(state.end_date.map(Into::into)),
            product_image: Set(state.product_image.clone()),
            bids: Set(to_json(&state.bids)?),
            likes: Set(to_json(&state.likes)?),
            comments: Set(to_json(&state.comments)?),
            revision: Set(to_revision(state.revision)?),
        })
    }
}
