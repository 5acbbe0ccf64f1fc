mod config;
mod logger;
mod tls;

use std::path::PathBuf;

use actix_files::{Files, NamedFile};
use actix_web::{middleware::Logger, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use log::{error, info};
use rustls::crypto::{ring::default_provider, CryptoProvider};

use crate::config::ServerConfig;

/* ---------- Fallback SPA (index.html) ----------------------------------- */
async fn spa_fallback(req: HttpRequest, index: web::Data<PathBuf>) -> Result<HttpResponse> {
    Ok(NamedFile::open(index.get_ref())?.into_response(&req))
}

/* ---------- main -------------------------------------------------------- */
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    logger::init();

    let cfg = ServerConfig::from_env().map_err(|e| {
        error!("configuration: {e:#}");
        std::io::Error::other(e)
    })?;
    if !cfg.index().exists() {
        error!("{} not found, run `trunk build` in frontend/ first", cfg.index().display());
    }
    info!("serving {} on {}", cfg.dist.display(), cfg.addr);

    let dist = cfg.dist.clone();
    let index = web::Data::new(cfg.index());
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(index.clone())
            .service(Files::new("/", &dist).index_file("index.html"))
            .default_service(web::to(spa_fallback))
    });

    match &cfg.tls {
        Some(paths) => {
            // Un seul provider pour tout le process.
            if CryptoProvider::install_default(default_provider()).is_err() {
                info!("rustls provider already installed");
            }
            let tls_cfg = tls::rustls_config(paths).map_err(|e| {
                error!("TLS: {e:#}");
                std::io::Error::other(e)
            })?;
            info!("TLS enabled ({})", paths.cert.display());
            server.bind_rustls_0_23(cfg.addr, tls_cfg)?.run().await
        }
        None => server.bind(cfg.addr)?.run().await,
    }
}
