use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

mod dto;
mod handlers;
mod middleware;
mod routes;

use ss_core::services::otp::{OtpService, OtpServiceConfig};
use ss_infra::cache::{RedisClient, RedisOtpCache};
use ss_infra::database::{create_pool, MySqlVerificationRequestRepository};
use ss_infra::email::EmailService;
use ss_shared::config::AppConfig;

use routes::AppState;

type OtpServiceImpl = OtpService<EmailService, RedisOtpCache, MySqlVerificationRequestRepository>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting ShabdSetu OTP service");

    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();

    let pool = create_pool(&config.database)
        .await
        .map_err(to_io_error)?;
    let redis = RedisClient::new(&config.cache).await.map_err(to_io_error)?;
    let email_service = EmailService::from_config(&config.email).map_err(to_io_error)?;

    let otp_service: Arc<OtpServiceImpl> = Arc::new(OtpService::new(
        Arc::new(email_service),
        Arc::new(RedisOtpCache::new(redis, &config.otp)),
        Arc::new(MySqlVerificationRequestRepository::new(pool)),
        OtpServiceConfig::from(&config.otp),
    ));

    info!(
        "OTP windows: resend cooldown {}m, code expiry {}m",
        config.otp.resend_interval_minutes, config.otp.expiry_minutes
    );
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || {
        let cors = middleware::cors::create_cors();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(AppState {
                otp_service: Arc::clone(&otp_service),
            }))
            .route("/health", web::get().to(health_check))
            .service(web::scope("/api").configure(
                routes::auth::configure::<
                    EmailService,
                    RedisOtpCache,
                    MySqlVerificationRequestRepository,
                >,
            ))
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn to_io_error(error: ss_infra::InfrastructureError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, error.to_string())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "shabdsetu-otp",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "message": "The requested resource was not found",
    }))
}
