// Discord adapter: board message lifecycle, prefix commands, per-rank kill
// buttons, and the render worker that owns every board edit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use chrono::Utc;
use serenity::all::{
    ButtonStyle, ChannelId, Context, CreateActionRow, CreateButton, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, EditMessage, EventHandler, GatewayIntents,
    GetMessages, Http, Interaction, Message, MessageId, MessageType, Ready,
};
use serenity::async_trait;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::board;
use crate::catalog::{Rank, World};
use crate::commands::{self, Command};
use crate::config::DiscordConfig;
use crate::metrics;
use crate::store::{StoreError, TimerStore};

/// Fixed cadence of the autonomous board refresh.
pub const REFRESH_PERIOD: StdDuration = StdDuration::from_secs(60);

/// How long transient replies (errors, confirmations) stay in the channel.
const TRANSIENT_REPLY_TTL: StdDuration = StdDuration::from_secs(10);

/// State shared between the event handler, the render worker, and main.
pub struct BotContext {
    pub store: TimerStore,
    pub channel_id: ChannelId,
    /// Worlds to keep boards for, in display order.
    pub worlds: Vec<World>,
    /// Live board message per world; filled in once startup has posted them.
    boards: Mutex<HashMap<World, MessageId>>,
    refresh: UnboundedSender<World>,
}

impl BotContext {
    pub fn new(
        store: TimerStore,
        channel_id: u64,
        worlds: Vec<World>,
        refresh: UnboundedSender<World>,
    ) -> Self {
        Self {
            store,
            channel_id: ChannelId::new(channel_id),
            worlds,
            boards: Mutex::new(HashMap::new()),
            refresh,
        }
    }

    fn register_board(&self, world: World, message_id: MessageId) {
        self.boards.lock().unwrap().insert(world, message_id);
    }

    fn board_message(&self, world: World) -> Option<MessageId> {
        self.boards.lock().unwrap().get(&world).copied()
    }

    /// Worlds with a live board, in display order.
    fn registered_worlds(&self) -> Vec<World> {
        let boards = self.boards.lock().unwrap();
        self.worlds
            .iter()
            .copied()
            .filter(|w| boards.contains_key(w))
            .collect()
    }
}

/// Gateway event handler.
pub struct Handler {
    pub bot: Arc<BotContext>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("logged in as {}", ready.user.name);
        if let Err(e) = self.post_boards(&ctx).await {
            tracing::error!("failed to set up boards: {e}");
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot || msg.channel_id != self.bot.channel_id {
            return;
        }
        let Some(parsed) = commands::parse_command(&msg.content, &self.bot.worlds) else {
            return;
        };

        match parsed.and_then(|command| self.apply(command).map_err(Into::into)) {
            Ok(world) => {
                let _ = self.bot.refresh.send(world);
                transient_reply(&ctx, &msg, &format!("\u{1F552} timers updated on {world}")).await;
            }
            Err(e) => {
                metrics::COMMAND_ERRORS_TOTAL.inc();
                transient_reply(&ctx, &msg, &format!("\u{26A0} {e}")).await;
            }
        }

        // The triggering message goes away after handling, success or not
        if let Err(e) = msg.delete(&ctx.http).await {
            tracing::warn!("failed to delete command message: {e}");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            return;
        };
        let Some((world, rank)) = parse_button_id(&component.data.custom_id) else {
            return;
        };

        let now = Utc::now();
        if let Err(e) = self.bot.store.mark_killed(world, rank, now) {
            tracing::error!("button press for unregistered board: {e}");
            return;
        }
        tracing::info!("{rank} marked killed on {world}");

        let body = board::render_board(world, &self.bot.store.snapshot(world), now);
        let response = CreateInteractionResponse::UpdateMessage(
            CreateInteractionResponseMessage::new()
                .content(body)
                .components(kill_buttons(world)),
        );
        match component.create_response(&ctx.http, response).await {
            Ok(()) => {
                metrics::BOARD_REFRESHES_TOTAL
                    .with_label_values(&["interaction"])
                    .inc();
            }
            Err(e) => {
                metrics::BOARD_REFRESH_ERRORS_TOTAL.inc();
                tracing::warn!("failed to update board from button press: {e}");
            }
        }
    }
}

impl Handler {
    /// Apply a validated command to the store.
    fn apply(&self, command: Command) -> Result<World, StoreError> {
        let now = Utc::now();
        match command {
            Command::SetAll { world, offset } => {
                self.bot.store.apply_offset(world, None, offset, now)?;
                Ok(world)
            }
            Command::Set {
                world,
                rank,
                offset,
            } => {
                self.bot.store.apply_offset(world, Some(rank), offset, now)?;
                Ok(world)
            }
        }
    }

    /// Replace any boards left over from a previous run, then post, pin and
    /// register one fresh board per tracked world.
    async fn post_boards(&self, ctx: &Context) -> serenity::Result<()> {
        let channel = self.bot.channel_id;
        let me = ctx.cache.current_user().id;

        for msg in channel.pins(&ctx.http).await? {
            if msg.author.id != me {
                continue;
            }
            if let Err(e) = msg.unpin(&ctx.http).await {
                tracing::warn!("failed to unpin stale board {}: {e}", msg.id);
            }
            if let Err(e) = msg.delete(&ctx.http).await {
                tracing::warn!("failed to delete stale board {}: {e}", msg.id);
            }
        }

        let now = Utc::now();
        for &world in &self.bot.worlds {
            let body = board::render_board(world, &self.bot.store.snapshot(world), now);
            let message = channel
                .send_message(
                    &ctx.http,
                    CreateMessage::new()
                        .content(body)
                        .components(kill_buttons(world)),
                )
                .await?;
            message.pin(&ctx.http).await?;
            self.bot.register_board(world, message.id);
            tracing::info!("board posted for {world}");
        }
        metrics::TRACKED_BOARDS.set(self.bot.worlds.len() as i64);

        // Give the platform a moment to post its pin notices, then sweep them
        tokio::time::sleep(StdDuration::from_secs(1)).await;
        match channel.messages(&ctx.http, GetMessages::new().limit(20)).await {
            Ok(messages) => {
                for msg in messages {
                    if msg.kind == MessageType::PinsAdd && msg.author.id == me {
                        if let Err(e) = msg.delete(&ctx.http).await {
                            tracing::warn!("failed to delete pin notice: {e}");
                        }
                    }
                }
            }
            Err(e) => tracing::warn!("failed to scan for pin notices: {e}"),
        }

        Ok(())
    }
}

/// Post a reply that deletes itself after a short delay.
async fn transient_reply(ctx: &Context, msg: &Message, text: &str) {
    match msg.channel_id.say(&ctx.http, text).await {
        Ok(reply) => {
            let http = ctx.http.clone();
            tokio::spawn(async move {
                tokio::time::sleep(TRANSIENT_REPLY_TTL).await;
                if let Err(e) = reply.delete(&http).await {
                    tracing::warn!("failed to delete transient reply: {e}");
                }
            });
        }
        Err(e) => tracing::warn!("failed to send reply: {e}"),
    }
}

/// The per-rank kill buttons under a board, five per row.
fn kill_buttons(world: World) -> Vec<CreateActionRow> {
    Rank::ALL
        .chunks(5)
        .map(|chunk| {
            CreateActionRow::Buttons(
                chunk
                    .iter()
                    .map(|&rank| {
                        CreateButton::new(button_id(world, rank))
                            .label(rank.short_name())
                            .style(ButtonStyle::Secondary)
                    })
                    .collect(),
            )
        })
        .collect()
}

fn button_id(world: World, rank: Rank) -> String {
    format!("kill:{}:{}", world.index(), rank.index())
}

fn parse_button_id(id: &str) -> Option<(World, Rank)> {
    let rest = id.strip_prefix("kill:")?;
    let (world, rank) = rest.split_once(':')?;
    Some((
        World::from_index(world.parse().ok()?)?,
        Rank::from_index(rank.parse().ok()?)?,
    ))
}

/// Spawn the render worker: the single consumer that owns every board
/// edit. Re-renders all boards on the fixed tick and one board per refresh
/// request. Failed edits are logged and skipped; the cadence never stalls
/// on a failed delivery.
pub fn spawn_render_worker(
    http: Arc<Http>,
    bot: Arc<BotContext>,
    mut refresh_rx: UnboundedReceiver<World>,
) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(REFRESH_PERIOD);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    for world in bot.registered_worlds() {
                        refresh_board(&http, &bot, world, "tick").await;
                    }
                }
                Some(world) = refresh_rx.recv() => {
                    refresh_board(&http, &bot, world, "request").await;
                }
            }
        }
    });
}

async fn refresh_board(http: &Arc<Http>, bot: &BotContext, world: World, trigger: &str) {
    let Some(message_id) = bot.board_message(world) else {
        return;
    };
    let now = Utc::now();
    let body = board::render_board(world, &bot.store.snapshot(world), now);
    let edit = EditMessage::new()
        .content(body)
        .components(kill_buttons(world));
    match bot.channel_id.edit_message(http, message_id, edit).await {
        Ok(_) => {
            metrics::BOARD_REFRESHES_TOTAL
                .with_label_values(&[trigger])
                .inc();
        }
        Err(e) => {
            metrics::BOARD_REFRESH_ERRORS_TOTAL.inc();
            tracing::warn!("board refresh for {world} failed: {e}");
        }
    }
}

/// Build the gateway client for the board channel.
pub async fn build_client(
    config: &DiscordConfig,
    handler: Handler,
) -> serenity::Result<serenity::Client> {
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    serenity::Client::builder(&config.token, intents)
        .event_handler(handler)
        .await
}
