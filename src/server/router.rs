//! Route mount table.
//!
//! Handler groups are supplied from outside through [`HandlerGroups`] and nested under fixed
//! prefixes. Anything no group answers gets the decoy response, which is a plain 200 and
//! never reaches the error normalizer.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::server::{middleware::body::BODY_LIMIT_BYTES, state::AppState};

pub const LIVENESS_MESSAGE: &str = "API is running...";
pub const DECOY_MESSAGE: &str = "Hi Hackers, you are not allowed to access this API";

/// Externally defined handler groups, one per API prefix.
///
/// Every group defaults to an empty router; requests under the prefix of an empty group
/// fall through to the decoy response.
#[derive(Default)]
pub struct HandlerGroups {
    pub auth: Router<AppState>,
    pub user: Router<AppState>,
    pub document: Router<AppState>,
    pub document_type: Router<AppState>,
    pub checks: Router<AppState>,
    pub checklist_items: Router<AppState>,
    pub links: Router<AppState>,
    pub subscriptions: Router<AppState>,
}

impl HandlerGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auth(mut self, router: Router<AppState>) -> Self {
        self.auth = router;
        self
    }

    pub fn with_user(mut self, router: Router<AppState>) -> Self {
        self.user = router;
        self
    }

    pub fn with_document(mut self, router: Router<AppState>) -> Self {
        self.document = router;
        self
    }

    pub fn with_document_type(mut self, router: Router<AppState>) -> Self {
        self.document_type = router;
        self
    }

    pub fn with_checks(mut self, router: Router<AppState>) -> Self {
        self.checks = router;
        self
    }

    pub fn with_checklist_items(mut self, router: Router<AppState>) -> Self {
        self.checklist_items = router;
        self
    }

    pub fn with_links(mut self, router: Router<AppState>) -> Self {
        self.links = router;
        self
    }

    pub fn with_subscriptions(mut self, router: Router<AppState>) -> Self {
        self.subscriptions = router;
        self
    }

    /// Pairs every group with its mount prefix, in registration order.
    pub fn mounts(self) -> [(&'static str, Router<AppState>); 8] {
        [
            ("/api/auth", self.auth),
            ("/api/user", self.user),
            ("/api/document", self.document),
            ("/api/document-type", self.document_type),
            ("/api/checks", self.checks),
            ("/api/checklist-items", self.checklist_items),
            ("/api/links", self.links),
            ("/api/subscriptions", self.subscriptions),
        ]
    }
}

/// Builds the application router.
///
/// Prefix matching is segment based, so `/api/document-type/..` is only ever seen by the
/// document-type group and never by the document group. A request whose path matches a route
/// but whose method does not, including non-GET requests to `/`, receives the decoy like any
/// other unmatched request.
///
/// # Arguments
/// - `groups` - Handler groups to mount
/// - `cors` - Cross-origin layer applied to every route, including the decoy
///
/// # Returns
/// - `Router<AppState>` - Router awaiting its state
pub fn router(groups: HandlerGroups, cors: CorsLayer) -> Router<AppState> {
    let mut router = Router::new().route("/", get(liveness).fallback(decoy));

    for (prefix, group) in groups.mounts() {
        router = router.nest(prefix, group);
    }

    router
        .method_not_allowed_fallback(decoy)
        .fallback(decoy)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

async fn decoy() -> &'static str {
    DECOY_MESSAGE
}
