use std::path::{Path, PathBuf};

use async_trait::async_trait;
use teloxide::{net::Download, requests::Requester};
use tokio::io::AsyncWriteExt;

use crate::registration::{DownloadError, MediaGateway};
use crate::types::BotType;

/// Saves Telegram photos as `<dir>/<file_id>.jpg`.
pub struct TelegramMedia {
    bot: BotType,
    dir: PathBuf,
}

impl TelegramMedia {
    pub fn new(bot: BotType, dir: PathBuf) -> Self {
        Self { bot, dir }
    }
}

#[async_trait]
impl MediaGateway for TelegramMedia {
    async fn fetch(&self, remote: &str) -> Result<String, DownloadError> {
        let file = self.bot.get_file(remote).await?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(format!("{}.jpg", remote));
        let part = PartFile::new(self.dir.join(format!("{}.jpg.part", remote)));

        self.download_to(&file.path, &part.path).await?;
        tokio::fs::rename(&part.path, &path).await?;

        log::debug!("Downloaded {:?} to {:?}", remote, path);

        Ok(path.to_string_lossy().into_owned())
    }
}

/// Download target that is removed on drop, so a failed or timed out fetch
/// never leaves a truncated photo behind. Renaming it into place first makes
/// the removal a no-op.
struct PartFile {
    path: PathBuf,
}

impl PartFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if std::fs::remove_file(&self.path).is_ok() {
            log::debug!("Removed unfinished download {:?}", self.path);
        }
    }
}

impl TelegramMedia {
    async fn download_to(&self, remote_path: &str, local: &Path) -> Result<(), DownloadError> {
        let mut destination = tokio::fs::File::create(local).await?;
        self.bot.download_file(remote_path, &mut destination).await?;
        destination.flush().await?;
        Ok(())
    }
}
