use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::database::NewTeam;
use crate::lexicon::FAILURE;

use super::event::{Effect, Inbound, Response, Transition};
use super::gateway::{
    DownloadError, MediaGateway, PersistenceGateway, SessionStore, SessionStoreError, StorageError,
};
use super::machine::{current_prompt, transition};
use super::state::{RegistrationDraft, Session};

#[derive(Debug, Error)]
enum EffectError {
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Runs one inbound event through the state machine and its side effects.
///
/// Callers must not run two events for the same chat concurrently.
pub struct Registrar {
    sessions: Arc<dyn SessionStore>,
    persistence: Arc<dyn PersistenceGateway>,
    media: Arc<dyn MediaGateway>,
    download_timeout: Duration,
}

impl Registrar {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        persistence: Arc<dyn PersistenceGateway>,
        media: Arc<dyn MediaGateway>,
        download_timeout: Duration,
    ) -> Self {
        Self {
            sessions,
            persistence,
            media,
            download_timeout,
        }
    }

    pub async fn handle(&self, inbound: Inbound) -> Result<Vec<Response>, SessionStoreError> {
        let chat_id = inbound.chat_id;
        let session = self.sessions.load(chat_id).await?;

        let Transition {
            session: mut next,
            effects,
        } = transition(&session, &inbound);

        let mut created_team = None;
        let replies = match self.apply(&mut next, effects, &mut created_team).await {
            Ok(replies) => replies,
            Err(e) => {
                // The transitioned session is dropped so the same step can be retried
                log::error!("Registration step failed for {:?}: {:?}", chat_id, e);
                if let Some(team_id) = created_team {
                    // the retry has to reuse the team row that already exists
                    let mut kept = session.clone();
                    kept.draft.team_id = Some(team_id);
                    self.sessions.save(chat_id, kept).await?;
                }
                let retry = current_prompt(&session);
                return Ok(vec![Response {
                    text: format!("{}\n\n{}", FAILURE, retry.text),
                    options: retry.options,
                }]);
            }
        };

        if !next.is_idle() {
            self.sessions.save(chat_id, next).await?;
        } else if !session.is_idle() {
            self.sessions.clear(chat_id).await?;
        }

        Ok(replies)
    }

    async fn apply(
        &self,
        session: &mut Session,
        effects: Vec<Effect>,
        created_team: &mut Option<i64>,
    ) -> Result<Vec<Response>, EffectError> {
        let mut replies = Vec::new();

        for effect in effects {
            match effect {
                Effect::Reply(response) => replies.push(response),
                Effect::FetchStudentCard { remote } => {
                    session.draft.st_card_photo = self.fetch(&remote).await?;
                }
                Effect::RegisterTeammate {
                    remote,
                    mut teammate,
                } => {
                    teammate.st_card_photo = self.fetch(&remote).await?;
                    session.draft.team_id =
                        Some(self.ensure_team(&session.draft, created_team).await?);
                    let user_id = self
                        .persistence
                        .insert_user(&session.draft.teammate_record(&teammate))
                        .await?;
                    log::info!(
                        "Registered teammate {} for team {:?}",
                        user_id,
                        session.draft.team_id
                    );
                    session.draft.teammates.push(teammate);
                }
                Effect::Submit(mut draft) => {
                    if draft.team_name.is_some() {
                        draft.team_id = Some(self.ensure_team(&draft, created_team).await?);
                    }
                    let user = draft.captain_record();
                    let user_id = self.persistence.insert_user(&user).await?;
                    log::info!(
                        "Registered {} (captain: {}, team: {:?})",
                        user_id,
                        user.is_captain,
                        user.team_id
                    );
                }
            }
        }

        Ok(replies)
    }

    /// Returns the draft's team id, inserting the team row on first use.
    async fn ensure_team(
        &self,
        draft: &RegistrationDraft,
        created_team: &mut Option<i64>,
    ) -> Result<i64, StorageError> {
        if let Some(team_id) = draft.team_id.or(*created_team) {
            return Ok(team_id);
        }

        let team = NewTeam {
            team_name: draft.team_name.clone().unwrap_or_default(),
            game: draft.game.clone(),
        };
        let team_id = self.persistence.insert_team(&team).await?;
        log::debug!("Created team {:?} with id {}", team.team_name, team_id);
        *created_team = Some(team_id);

        Ok(team_id)
    }

    async fn fetch(&self, remote: &str) -> Result<String, DownloadError> {
        log::debug!("Fetching photo {:?}", remote);
        tokio::time::timeout(self.download_timeout, self.media.fetch(remote))
            .await
            .map_err(|_| DownloadError::Timeout(self.download_timeout))?
    }
}
