//! Route definitions for job submission.
//!
//! ```text
//! POST   /image-generation               generate_image
//! POST   /video-generation               generate_video
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/image-generation", post(generation::generate_image))
        .route("/video-generation", post(generation::generate_video))
}
