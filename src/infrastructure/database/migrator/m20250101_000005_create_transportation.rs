//! Create transportation_types and transportation_bookings tables

use sea_orm_migration::prelude::*;

use super::m20250101_000004_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TransportationTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransportationTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TransportationTypes::Name).string().not_null())
                    .col(
                        ColumnDef::new(TransportationTypes::Icon)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(TransportationTypes::BaseRateCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportationTypes::PerKmRateCents)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransportationBookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransportationBookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TransportationBookings::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportationBookings::TransportationTypeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransportationBookings::ParkingBookingId).integer())
                    .col(
                        ColumnDef::new(TransportationBookings::PickupLocation)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportationBookings::DropoffLocation)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportationBookings::PickupTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransportationBookings::IsShared)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TransportationBookings::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(TransportationBookings::AmountCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TransportationBookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transportation_bookings_type")
                            .from(
                                TransportationBookings::Table,
                                TransportationBookings::TransportationTypeId,
                            )
                            .to(TransportationTypes::Table, TransportationTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transportation_bookings_parking")
                            .from(
                                TransportationBookings::Table,
                                TransportationBookings::ParkingBookingId,
                            )
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transportation_bookings_user")
                    .table(TransportationBookings::Table)
                    .col(TransportationBookings::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(TransportationBookings::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(TransportationTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TransportationTypes {
    Table,
    Id,
    Name,
    Icon,
    BaseRateCents,
    PerKmRateCents,
}

#[derive(Iden)]
pub enum TransportationBookings {
    Table,
    Id,
    UserId,
    TransportationTypeId,
    ParkingBookingId,
    PickupLocation,
    DropoffLocation,
    PickupTime,
    IsShared,
    Status,
    AmountCents,
    CreatedAt,
}
