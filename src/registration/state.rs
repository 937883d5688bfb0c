use serde::{Deserialize, Serialize};

use crate::database::PersistedUser;

/// Which field the conversation is waiting for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationState {
    #[default]
    Idle,
    FillName,
    FillGroup,
    FillSteamLink,
    FillPhoto,
    FillGame,
    TeamOrSolo,
    FillTeamName,
    AddTeammate,
    FillTeammateData,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeammateDraft {
    pub name: String,
    pub group_num: String,
    pub steam_link: String,
    pub tg_link: String,
    pub st_card_photo: String,
}

/// Data collected so far for the user who started the registration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub name: String,
    pub group_num: String,
    pub tg_link: Option<String>,
    pub steam_link: String,
    pub st_card_photo: String,
    pub game: String,
    pub is_captain: bool,
    pub team_name: Option<String>,
    pub team_id: Option<i64>,
    pub teammates: Vec<TeammateDraft>,
}

impl RegistrationDraft {
    pub fn captain_record(&self) -> PersistedUser {
        PersistedUser {
            name: self.name.clone(),
            group_num: self.group_num.clone(),
            tg_link: self.tg_link.clone(),
            steam_link: self.steam_link.clone(),
            st_card_photo: self.st_card_photo.clone(),
            game: self.game.clone(),
            team_id: self.team_id,
            team_name: self.team_name.clone(),
            is_captain: self.is_captain,
        }
    }

    pub fn teammate_record(&self, teammate: &TeammateDraft) -> PersistedUser {
        PersistedUser {
            name: teammate.name.clone(),
            group_num: teammate.group_num.clone(),
            tg_link: Some(teammate.tg_link.clone()),
            steam_link: teammate.steam_link.clone(),
            st_card_photo: teammate.st_card_photo.clone(),
            game: self.game.clone(),
            team_id: self.team_id,
            team_name: self.team_name.clone(),
            is_captain: false,
        }
    }
}

/// Everything stored per chat between two messages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub state: RegistrationState,
    pub draft: RegistrationDraft,
    /// Set while the user is asked whether to abandon the registration.
    pub confirming_cancel: bool,
}

impl Session {
    pub fn is_idle(&self) -> bool {
        self.state == RegistrationState::Idle
    }

    pub fn with_state(&self, state: RegistrationState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }
}
