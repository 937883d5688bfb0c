use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

mod config;
mod database;
mod handlers;
mod lexicon;
mod media;
mod registration;
mod types;
mod util;

use config::Config;
use media::TelegramMedia;
use registration::{Command, DialogueStore, Registrar, Session};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    log::info!("Starting tournament registration bot");

    let config = Config::from_env()?;
    log::debug!("Config: {:?}", config);

    let db = database::open(&config.database_location).await?;

    let bot = Bot::from_env().parse_mode(teloxide::types::ParseMode::Html);

    bot.set_my_commands(Command::bot_commands())
        .await
        .context("Failed to register bot commands")?;

    let registrar = Arc::new(Registrar::new(
        Arc::new(DialogueStore::new(InMemStorage::<Session>::new())),
        Arc::new(db),
        Arc::new(TelegramMedia::new(bot.clone(), config.image_dir.clone())),
        config.download_timeout,
    ));

    let tree = Update::filter_message().endpoint(handlers::receive_message);

    log::debug!("Starting dispatcher");

    // The dispatcher handles updates of one chat sequentially, which is what
    // the registrar requires
    Dispatcher::builder(bot, tree)
        .dependencies(dptree::deps![registrar])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
