use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_create_user_table::User;

static IDX_TICKET_DESTINATION_KEY_DEPARTURE_DATE: &str = "idx_ticket_destination_key_departure_date";
static IDX_TICKET_USER_ID: &str = "idx_ticket_user_id";
static FK_TICKET_USER_ID: &str = "fk_ticket_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(integer(Ticket::UserId))
                    .col(string(Ticket::Destination))
                    .col(string(Ticket::DestinationKey))
                    .col(date(Ticket::DepartureDate))
                    .col(string(Ticket::TicketUrl))
                    .col(string_len(Ticket::Status, 16).default("PENDING"))
                    .col(timestamp(Ticket::CreatedAt))
                    .col(timestamp(Ticket::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TICKET_USER_ID)
                            .from(Ticket::Table, Ticket::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TICKET_USER_ID)
                    .table(Ticket::Table)
                    .col(Ticket::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TICKET_DESTINATION_KEY_DEPARTURE_DATE)
                    .table(Ticket::Table)
                    .col(Ticket::DestinationKey)
                    .col(Ticket::DepartureDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TICKET_DESTINATION_KEY_DEPARTURE_DATE)
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TICKET_USER_ID)
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Ticket {
    Table,
    Id,
    UserId,
    Destination,
    DestinationKey,
    DepartureDate,
    TicketUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}
