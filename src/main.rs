use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use taskdesk::auth::{AuthMiddleware, TokenService};
use taskdesk::config::Config;
use taskdesk::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Signing secret and TTL are folded in once here; nothing reads the
    // environment after startup.
    let tokens = web::Data::new(TokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_minutes,
    ));

    log::info!("Starting TaskDesk server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(tokens.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .service(routes::health::health)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
