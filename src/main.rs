/*
 * Responsibility
 * - tokio runtime entry point
 * - app::run() の呼び出し（ロジックは置かない）
 */
use anyhow::Result;

use forum_api::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
