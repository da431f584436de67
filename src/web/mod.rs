//! Web adapter: actix server bootstrap.
//!
//! Serves the bundled single-page UI and the JSON API over one shared
//! `Store`. Each request is a short-lived sequence of store calls with no
//! cross-request state; the store's internal mutex serializes access across
//! worker threads. Runs until interrupted; actix stops the workers in an
//! orderly fashion on Ctrl+C.

pub mod api;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use crate::config::Config;
use crate::store::Store;
use api::AppState;

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(&config.db_path)?;
    let data = web::Data::new(AppState { store });
    let port = config.port;

    log::info!("starting snipstash web server on port {port}");
    println!("Snippet manager listening on http://127.0.0.1:{port}");
    println!("Press Ctrl+C to stop.");

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .app_data(data.clone())
                .wrap(Logger::default())
                .wrap(cors)
                .configure(api::config)
                .default_service(web::to(api::fallback))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    })?;

    Ok(())
}
