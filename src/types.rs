use sqlx::{Pool, Sqlite};
use teloxide::{adaptors::DefaultParseMode, Bot};

pub type HandlerResult = anyhow::Result<()>;

pub type BotType = DefaultParseMode<Bot>;
pub type DbConn = Pool<Sqlite>;
