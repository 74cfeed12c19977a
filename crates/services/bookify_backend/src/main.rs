// File: services/bookify_backend/src/main.rs
use axum::Router;
use bookify_advisors::handlers::AdvisorsState;
use bookify_advisors::routes as advisors_routes;
use bookify_advisors::store::JsonAdvisorStore;
use bookify_booking::handlers::BookingState;
use bookify_booking::routes as booking_routes;
use bookify_booking::service::BookingService;
use bookify_booking::webhook::WebhookSink;
use bookify_common::logging;
use bookify_common::services::{
    AdvisorStore, BoxedAdvisorStore, BoxedCalendarConnector, BoxedError, BoxedNotificationSink,
    CalendarConnector, NotificationSink,
};
use bookify_config::load_config;
use bookify_gcal::handlers::GcalState;
use bookify_gcal::oauth::OAuthClient;
use bookify_gcal::routes as gcal_routes;
use bookify_gcal::service::GoogleCalendarConnector;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

const DEFAULT_ADVISORS_FILE: &str = "advisors.json";
const DEFAULT_TIME_ZONE: &str = "Asia/Jerusalem";

#[tokio::main]
async fn main() {
    logging::init();
    let config = load_config().expect("Failed to load config");
    let base_url = config.base_url();

    let advisors_file = config
        .booking
        .advisors_file
        .clone()
        .unwrap_or_else(|| DEFAULT_ADVISORS_FILE.to_string());
    let store = JsonAdvisorStore::load(advisors_file)
        .await
        .expect("Failed to open advisor store");
    let store: Arc<dyn AdvisorStore<Error = BoxedError>> = Arc::new(BoxedAdvisorStore(store));

    let oauth = OAuthClient::new(config.oauth.clone(), &base_url);
    if !oauth.is_configured() {
        warn!("Google OAuth is not configured; advisors cannot connect calendars");
    }
    let connector: Arc<dyn CalendarConnector<Error = BoxedError>> = Arc::new(
        BoxedCalendarConnector(GoogleCalendarConnector::new(oauth.clone())),
    );

    let webhook: Option<Arc<dyn NotificationSink<Error = BoxedError>>> =
        config.booking.webhook_url.clone().map(|url| {
            info!("Booking notifications will be posted to {}", url);
            Arc::new(BoxedNotificationSink(WebhookSink::new(url)))
                as Arc<dyn NotificationSink<Error = BoxedError>>
        });

    let time_zone: Tz = config
        .booking
        .time_zone
        .as_deref()
        .unwrap_or(DEFAULT_TIME_ZONE)
        .parse()
        .expect("Invalid booking time zone");

    let advisors_state = Arc::new(AdvisorsState {
        store: store.clone(),
        base_url: base_url.clone(),
    });
    let gcal_state = Arc::new(GcalState {
        oauth,
        connector: connector.clone(),
        store: store.clone(),
        base_url: base_url.clone(),
    });
    let booking_state = Arc::new(BookingState {
        service: BookingService::new(store, connector, webhook, time_zone),
    });

    let api_router = Router::new()
        .merge(advisors_routes::routes(advisors_state))
        .merge(gcal_routes::api_routes(gcal_state.clone()))
        .merge(booking_routes::routes(booking_state));

    let app = Router::new()
        .nest("/api", api_router)
        .merge(gcal_routes::auth_routes(gcal_state))
        .fallback_service(ServeDir::new("public"));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
