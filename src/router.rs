//! Route table and shared application state.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::services::{ServeDir, ServeFile};

use crate::db::SiteStorage;
use crate::handlers::{auth, contact, content, testimonials};
use crate::service::sessions::SessionRegistry;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct BrochureState {
    pub storage: SiteStorage,
    pub sessions: SessionRegistry,
    pub setup_key: Arc<str>,
    pub bcrypt_cost: u32,
}

impl BrochureState {
    pub fn new(
        storage: SiteStorage,
        sessions: SessionRegistry,
        setup_key: Arc<str>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            storage,
            sessions,
            setup_key,
            bcrypt_cost,
        }
    }
}

/// Build the `/api` router.
pub fn brochure_router(state: BrochureState) -> Router {
    let api = Router::new()
        // public
        .route("/content", get(content::list_sections))
        .route("/content/{key}", get(content::get_section))
        .route("/testimonials", get(testimonials::list_testimonials))
        .route("/contact-info", get(content::get_contact_info))
        .route(
            "/contact",
            post(contact::submit_contact).get(contact::list_submissions),
        )
        // admin auth
        .route("/admin/login", post(auth::login))
        .route("/admin/logout", post(auth::logout))
        .route("/admin/me", get(auth::me))
        .route("/admin/setup", post(auth::setup))
        // admin content management
        .route("/admin/content/{key}", put(content::upsert_section))
        .route("/admin/testimonials", post(testimonials::create_testimonial))
        .route(
            "/admin/testimonials/{id}",
            put(testimonials::update_testimonial).delete(testimonials::delete_testimonial),
        )
        .route("/admin/contact-info", put(content::upsert_contact_info))
        .with_state(state);

    Router::new().nest("/api", api)
}

/// Serve the pre-built frontend bundle, falling back to `index.html` so
/// client-side routes survive a hard refresh. API routes keep
/// precedence because the fallback only catches unmatched paths.
pub fn spa_fallback(router: Router, assets_dir: &Path) -> Router {
    let index = assets_dir.join("index.html");
    router.fallback_service(ServeDir::new(assets_dir).fallback(ServeFile::new(index)))
}
