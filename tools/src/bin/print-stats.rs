use clap::Parser;

use morpion_server::stats;

/// Prints the landing page statistics as JSON.
#[derive(Parser, Debug)]
struct Config {
    #[arg(long)]
    db: String,
    #[arg(long, value_delimiter = ',', default_value = "team,morpion,game")]
    tables: Vec<String>,
    #[arg(long, default_value_t = 3)]
    top_limit: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("sqlx", log::LevelFilter::Error)
        .init();
    let cfg = Config::parse();
    let db = sea_orm::Database::connect(cfg.db).await?;
    let stats = stats::landing_page_stats(&db, cfg.tables.as_slice(), cfg.top_limit).await;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
