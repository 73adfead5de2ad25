/// History query service
///
/// Read-only actix-web front end over the result store:
/// - `GET /` recent results as HTML
/// - `GET /status` recent results as JSON
/// - `GET /daily` daily aggregates as JSON
/// - `GET /health` liveness
pub mod error;
pub mod history;
pub mod render;
pub mod routes;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::database::ResultStore;

/// Build the app for `store`; shared by [`serve`] and the route tests.
pub fn configure(store: web::Data<dyn ResultStore>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(store);
        routes::routes(cfg);
    }
}

/// Serve the history on `bind:port` until the process is stopped.
pub async fn serve(bind: &str, port: u16, store: Arc<dyn ResultStore>) -> std::io::Result<()> {
    let store: web::Data<dyn ResultStore> = web::Data::from(store);

    let server = HttpServer::new(move || App::new().configure(configure(store.clone()))).bind((bind, port))?;

    for addr in server.addrs() {
        info!("History service listening on http://{addr}");
    }

    server.run().await
}
