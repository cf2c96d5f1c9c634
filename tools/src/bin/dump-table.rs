use anyhow::anyhow;
use clap::Parser;

use morpion_server::query;

/// Prints every row of a table, one JSON record per line.
#[derive(Parser, Debug)]
struct Config {
    #[arg(long)]
    db: String,
    #[arg(long)]
    table: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("sqlx", log::LevelFilter::Error)
        .init();
    let cfg = Config::parse();
    let db = sea_orm::Database::connect(cfg.db).await?;
    let records = query::dump_table(&db, &cfg.table)
        .await
        .ok_or_else(|| anyhow!("Failed to read table {}", cfg.table))?;
    for r in records {
        println!("{}", serde_json::to_string(&r)?);
    }
    Ok(())
}
