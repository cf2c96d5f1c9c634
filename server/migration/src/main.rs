use sea_orm_migration::prelude::*;

// `MORPION_POPULATE_DATABASE` (from the environment or `.env`) makes `up`
// seed the morpion catalog and the game configs.
#[async_std::main]
async fn main() {
    let _ = dotenvy::dotenv();
    cli::run_cli(migration::Migrator).await;
}
