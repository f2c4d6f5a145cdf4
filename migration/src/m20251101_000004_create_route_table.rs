use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_create_user_table::User;

static IDX_ROUTE_USER_ID: &str = "idx_route_user_id";
static FK_ROUTE_USER_ID: &str = "fk_route_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Route::Table)
                    .if_not_exists()
                    .col(pk_auto(Route::Id))
                    .col(integer(Route::UserId))
                    .col(double(Route::OriginLat))
                    .col(double(Route::OriginLng))
                    .col(double(Route::DestinationLat))
                    .col(double(Route::DestinationLng))
                    .col(string_null(Route::OriginName))
                    .col(string_null(Route::DestinationName))
                    .col(text_null(Route::Waypoints))
                    .col(double(Route::Distance))
                    .col(double(Route::Duration))
                    .col(text(Route::EncodedPolyline))
                    .col(string_null(Route::TripName))
                    .col(text_null(Route::Notes))
                    .col(timestamp(Route::CreatedAt))
                    .col(timestamp(Route::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ROUTE_USER_ID)
                            .from(Route::Table, Route::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROUTE_USER_ID)
                    .table(Route::Table)
                    .col(Route::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROUTE_USER_ID)
                    .table(Route::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Route::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Route {
    Table,
    Id,
    UserId,
    OriginLat,
    OriginLng,
    DestinationLat,
    DestinationLng,
    OriginName,
    DestinationName,
    Waypoints,
    Distance,
    Duration,
    EncodedPolyline,
    TripName,
    Notes,
    CreatedAt,
    UpdatedAt,
}
