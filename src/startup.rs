use crate::configuration::Settings;
use crate::health::Prober;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let prober = Prober::new(settings.prober)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    tracing::info!(
        targets = prober.targets().len(),
        timeout = ?prober.timeout(),
        "Prober configured"
    );
    let prober = web::Data::new(Arc::new(prober));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(prober.clone())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(web::scope("/api").service(routes::status_handler))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
