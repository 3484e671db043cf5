/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /auth, /topic を route
 * - 認証/認可の適用範囲は middleware::auth::apply 側で決める
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::login,
    health::health,
    topics::{create_topic, delete_topic, get_topic, list_topics, update_topic},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth", post(login))
        .route("/topic", get(list_topics).post(create_topic))
        .route(
            "/topic/{topic_id}",
            get(get_topic).put(update_topic).delete(delete_topic),
        )
}
