mod cors;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post, put};
use tower_http::trace::TraceLayer;
use wayfare_core::AppError;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me_handler))
        .route("/auth/logout", post(handlers::auth::logout_handler))
        .route(
            "/api/invites/accept",
            post(handlers::auth::accept_invites_handler),
        )
        .route(
            "/api/sites",
            get(handlers::sites::list_sites_handler).post(handlers::sites::create_site_handler),
        )
        .route(
            "/api/sites/active",
            get(handlers::sites::active_site_handler)
                .put(handlers::sites::set_active_site_handler),
        )
        .route(
            "/api/sites/{site_id}",
            patch(handlers::sites::update_site_handler)
                .delete(handlers::sites::delete_site_handler),
        )
        .route(
            "/api/sites/{site_id}/permissions",
            get(handlers::sites::site_permissions_handler),
        )
        .route(
            "/api/sites/{site_id}/members",
            get(handlers::team::list_members_handler).post(handlers::team::add_member_handler),
        )
        .route(
            "/api/sites/{site_id}/members/{membership_id}",
            put(handlers::team::update_member_role_handler)
                .delete(handlers::team::remove_member_handler),
        )
        .route(
            "/api/sites/{site_id}/menus",
            get(handlers::menus::list_menus_handler).post(handlers::menus::create_menu_handler),
        )
        .route(
            "/api/sites/{site_id}/menus/{menu_id}",
            get(handlers::menus::get_menu_handler)
                .put(handlers::menus::save_menu_handler)
                .delete(handlers::menus::delete_menu_handler),
        )
        .route(
            "/api/sites/{site_id}/menu-items/derive",
            post(handlers::menus::derive_menu_item_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
