//! Transportation booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transportation_bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,
    pub transportation_type_id: i32,

    #[sea_orm(nullable)]
    pub parking_booking_id: Option<i32>,

    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_time: DateTimeUtc,
    pub is_shared: bool,

    /// pending, confirmed, canceled, completed
    pub status: String,

    pub amount_cents: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transportation_type::Entity",
        from = "Column::TransportationTypeId",
        to = "super::transportation_type::Column::Id"
    )]
    TransportationType,
}

impl Related<super::transportation_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransportationType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
