use morpion_db::{prelude::*, team};
use sea_orm::EntityTrait;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn idx<E: EntityTrait>(s: &sea_orm::Schema, e: E) -> Vec<IndexCreateStatement> {
    s.create_index_from_entity(e)
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        let s = sea_orm::Schema::new(m.get_database_backend());
        // Referenced tables first: foreign keys are emitted with the table.
        m.create_table(s.create_table_from_entity(Config)).await?;
        m.create_table(s.create_table_from_entity(Team)).await?;
        m.create_table(s.create_table_from_entity(Morpion)).await?;
        m.create_table(s.create_table_from_entity(TeamMorpion))
            .await?;
        m.create_table(s.create_table_from_entity(Game)).await?;
        m.create_table(s.create_table_from_entity(LogsEntry)).await?;
        let s = &s;
        let all_idx = [
            idx(s, Config),
            idx(s, Team),
            idx(s, Morpion),
            idx(s, TeamMorpion),
            idx(s, Game),
            idx(s, LogsEntry),
        ]
        .into_iter()
        .flatten();
        for mut i in all_idx {
            i.if_not_exists();
            m.create_index(i).await?;
        }
        let mut team_name_color_index = Index::create();
        team_name_color_index
            .name("team-name-color-index")
            .if_not_exists()
            .unique()
            .table(Team)
            .col(team::Column::Name)
            .col(team::Column::Color);
        m.create_index(team_name_color_index).await?;
        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(LogsEntry).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop logs_entry"))?;
        m.drop_table(Table::drop().table(Game).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop game"))?;
        m.drop_table(Table::drop().table(TeamMorpion).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop team_morpion"))?;
        m.drop_table(Table::drop().table(Morpion).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop morpion"))?;
        m.drop_table(Table::drop().table(Team).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop team"))?;
        m.drop_table(Table::drop().table(Config).if_exists().to_owned())
            .await
            .inspect_err(log_err("drop config"))?;
        Ok(())
    }
}

fn log_err<'a>(ctx: &'a str) -> impl FnOnce(&DbErr) + 'a {
    move |e| {
        eprintln!("{ctx}: {e}");
    }
}
