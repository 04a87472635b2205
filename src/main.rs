use std::sync::Arc;

use chrono::Utc;

use huntboard::bot::{self, BotContext, Handler};
use huntboard::config::Config;
use huntboard::metrics;
use huntboard::store::TimerStore;
use huntboard::webhook::{self, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::load();
    metrics::register_metrics();

    let store = TimerStore::new(&config.worlds, Utc::now());
    let (refresh_tx, refresh_rx) = tokio::sync::mpsc::unbounded_channel();

    let app = webhook::router(AppState {
        store: store.clone(),
        refresh: refresh_tx.clone(),
    });
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind HTTP listener");
    tracing::info!("webhook listening on port {}", config.port);
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("failed to start HTTP listener");
    });

    match &config.discord {
        Some(discord) => {
            let bot_ctx = Arc::new(BotContext::new(
                store,
                discord.channel_id,
                config.worlds.clone(),
                refresh_tx,
            ));
            let mut client = bot::build_client(discord, Handler {
                bot: bot_ctx.clone(),
            })
            .await
            .expect("failed to build Discord client");

            bot::spawn_render_worker(client.http.clone(), bot_ctx, refresh_rx);

            if let Err(e) = client.start().await {
                tracing::error!("Discord client stopped: {e}");
            }
        }
        None => {
            // Webhook-only mode: timers are still recorded, no boards exist
            tracing::error!("BOT_TOKEN not set; bot disabled, running webhook only");
            drop(refresh_rx);
            let _ = server.await;
        }
    }
}
