use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::UserId;
use serenity::prelude::*;
use std::sync::{Arc, OnceLock};

use glugglug::commands::{CommandContext, CommandRouter};
use glugglug::core::Config;
use glugglug::features::hydration::HydrationTracker;
use glugglug::features::reminders::{Notifier, ReminderFirer, ReminderScheduler, TokioTimer};

/// Sends reminders as Discord direct messages
///
/// The HTTP client only exists once the gateway client is built, so it is
/// attached after construction.
#[derive(Default)]
struct DiscordNotifier {
    http: OnceLock<Arc<Http>>,
}

impl DiscordNotifier {
    fn attach(&self, http: Arc<Http>) {
        if self.http.set(http).is_err() {
            warn!("Discord HTTP client was already attached to the notifier");
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, user_id: &str, text: &str) -> Result<()> {
        let http: &Http = self
            .http
            .get()
            .ok_or_else(|| anyhow::anyhow!("Discord client not connected yet"))?;
        let id: u64 = user_id
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid Discord user id {user_id}: {e}"))?;

        let dm = UserId(id).create_dm_channel(http).await?;
        dm.say(http, text).await?;
        Ok(())
    }
}

struct Handler {
    router: Arc<CommandRouter>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let user_id = msg.author.id.to_string();
        match self.router.handle_text(&user_id, &msg.content).await {
            Ok(Some(reply)) => {
                if let Err(why) = msg.channel_id.say(&ctx.http, reply).await {
                    error!("Failed to send reply to {user_id}: {why}");
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!("Error handling message: {e}");
                if let Err(why) = msg
                    .channel_id
                    .say(
                        &ctx.http,
                        "Sorry, I encountered an error processing your message.",
                    )
                    .await
                {
                    error!("Failed to send error message: {why}");
                }
            }
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        // Non-zero after a gateway reconnect
        let ctx = self.router.context();
        info!(
            "💧 Tracking {} users, {} active reminders, {} open dialogs",
            ctx.tracker.user_count(),
            ctx.scheduler.active_count().await,
            self.router.sessions().open_count()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting glugglug hydration bot...");
    info!(
        "💧 Daily target {}ml, awake from {} to {}, day rollover {}",
        config.daily_target_ml,
        config.wake_time,
        config.sleep_time,
        if config.day_rollover { "on" } else { "off" }
    );

    let notifier = Arc::new(DiscordNotifier::default());
    let tracker = HydrationTracker::new(config.daily_target_ml, config.day_rollover);
    let firer = Arc::new(ReminderFirer::new(
        tracker.clone(),
        notifier.clone(),
        config.wake_time,
        config.sleep_time,
    ));
    let scheduler = Arc::new(ReminderScheduler::new(Arc::new(TokioTimer::new()), firer));
    let router = CommandRouter::new(CommandContext::new(tracker, scheduler));

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler {
            router: Arc::new(router),
        })
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    // Reminders go out over the same HTTP client as replies
    notifier.attach(client.cache_and_http.http.clone());

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
