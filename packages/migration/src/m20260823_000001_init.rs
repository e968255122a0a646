use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----

#[derive(Iden)]
enum Players {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    Theme,
    Status,
    CreatedAt,
    CompletedAt,
}

#[derive(Iden)]
enum MatchPlayers {
    Table,
    Id,
    MatchId,
    PlayerId,
    Move,
    Outcome,
    CreatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Player1Name,
    Player2Name,
    Player1Move,
    Player2Move,
    Winner,
    CreatedAt,
}

#[derive(Iden)]
enum Leaderboard {
    Table,
    Id,
    PlayerId,
    PlayerName,
    Wins,
    Losses,
    Draws,
    UpdatedAt,
}

// Status/move/outcome columns are plain strings rather than native enum types
// so that the same migration runs on Postgres and on the SQLite test databases.

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Players::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Matches::Theme).string().not_null())
                    .col(ColumnDef::new(Matches::Status).string().not_null())
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::CompletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matches_status_theme")
                    .table(Matches::Table)
                    .col(Matches::Status)
                    .col(Matches::Theme)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MatchPlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchPlayers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MatchPlayers::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(MatchPlayers::PlayerId).big_integer().not_null())
                    .col(ColumnDef::new(MatchPlayers::Move).string())
                    .col(ColumnDef::new(MatchPlayers::Outcome).string())
                    .col(
                        ColumnDef::new(MatchPlayers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_players_match")
                            .from(MatchPlayers::Table, MatchPlayers::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_players_player")
                            .from(MatchPlayers::Table, MatchPlayers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One participant row per (match, player); join idempotency leans on this.
        manager
            .create_index(
                Index::create()
                    .name("uq_match_players_match_player")
                    .table(MatchPlayers::Table)
                    .col(MatchPlayers::MatchId)
                    .col(MatchPlayers::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::Player1Name).string().not_null())
                    .col(ColumnDef::new(Games::Player2Name).string().not_null())
                    .col(ColumnDef::new(Games::Player1Move).string().not_null())
                    .col(ColumnDef::new(Games::Player2Move).string().not_null())
                    .col(ColumnDef::new(Games::Winner).string())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_created_at")
                    .table(Games::Table)
                    .col(Games::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Leaderboard::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leaderboard::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Leaderboard::PlayerId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Leaderboard::PlayerName).string().not_null())
                    .col(
                        ColumnDef::new(Leaderboard::Wins)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Leaderboard::Losses)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Leaderboard::Draws)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Leaderboard::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leaderboard_player")
                            .from(Leaderboard::Table, Leaderboard::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Leaderboard::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MatchPlayers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;
        Ok(())
    }
}
