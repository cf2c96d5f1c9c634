use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sea_orm::Database;

use crate::config::*;
use crate::handlers::{
    get_create_team::get_create_team, get_index::get_index, get_teams::get_teams,
    post_create_team::post_create_team, post_teams::post_teams,
};
use crate::http_types::*;
use crate::server_state::*;

pub struct Handle {
    pub server: actix_web::dev::Server,
    pub addrs: Vec<std::net::SocketAddr>,
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let handle = create(config).await?;
    log::info!("Listening on {:?}", handle.addrs);
    handle.server.await?;
    Ok(())
}

pub async fn create(config: Config) -> anyhow::Result<Handle> {
    let mut db_options = sea_orm::ConnectOptions::new(&config.db_path);
    db_options.max_connections(32);
    let db = Database::connect(db_options)
        .await
        .context(format!("Failed to connect to {}", config.db_path))?;
    let mut tmpl = handlebars::Handlebars::new();
    tmpl.set_strict_mode(true);
    tmpl.set_dev_mode(true);
    let tf = |t: &str| -> std::path::PathBuf {
        std::path::Path::new(&config.server_config.fs_root_dir)
            .join("templates")
            .join(format!("{t}.hbs"))
    };
    tmpl.register_template_file("main", tf("main"))
        .context("Failed to register main template")?;
    tmpl.register_template_file("teams", tf("teams"))
        .context("Failed to register teams template")?;
    tmpl.register_template_file("create_team", tf("create_team"))
        .context("Failed to register create_team template")?;
    let port = config.server_config.port;

    let app_state = ServerState {
        tmpl,
        db,
        config: config.server_config,
        stats_config: config.stats_config,
    };

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(web::FormConfig::default().error_handler(|err, _req| {
                log::info!("Rejected form: {err}");
                AppHttpError::BadClientData.into()
            }))
            .app_data(
                actix_multipart::form::MultipartFormConfig::default().error_handler(
                    |err, _req| {
                        log::info!("Rejected multipart form: {err}");
                        AppHttpError::BadClientData.into()
                    },
                ),
            )
            .service(get_index)
            .service(get_teams)
            .service(post_teams)
            .service(get_create_team)
            .service(post_create_team)
            .service(actix_files::Files::new(
                "/static",
                std::path::Path::new(&app_state.config.fs_root_dir).join("static"),
            ))
            .default_service(web::to(|| async {
                Err::<actix_web::HttpResponse, _>(AppHttpError::NotFound)
            }))
    })
    .workers(8)
    .bind(("::", port))?;
    let addrs = server.addrs();
    let server = server.run(); // Does not actually run the server but creates a future.
    Ok(Handle { server, addrs })
}
