use teloxide::{macros::BotCommands, types::ChatId};

use super::state::{RegistrationDraft, Session, TeammateDraft};

#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Начать работу с ботом")]
    Start,

    #[command(description = "Показать справку")]
    Help,

    #[command(description = "Зарегистрироваться на турнир")]
    Register,

    #[command(description = "Отменить регистрацию")]
    Cancel,
}

/// What a single incoming message means to the registration flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Text(String),
    Photo {
        file_id: String,
        caption: Option<String>,
    },
    Command(Command),
    /// A `/command` this bot does not know.
    UnknownCommand,
    CancelConfirm(bool),
    /// Stickers, documents and anything else the flow never asks for.
    Unsupported,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inbound {
    pub chat_id: ChatId,
    pub sender_handle: Option<String>,
    pub event: Event,
}

/// A reply for the transport: text plus the reply keyboard options.
/// An empty option list removes the keyboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub options: Vec<&'static str>,
}

impl Response {
    pub fn new<T: Into<String>>(text: T, options: &[&'static str]) -> Self {
        Self {
            text: text.into(),
            options: options.to_vec(),
        }
    }
}

/// Side effects requested by a transition, executed in order by the registrar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Reply(Response),
    /// Download the captain's student card and store the local reference in the draft.
    FetchStudentCard { remote: String },
    /// Download the teammate's photo, persist the teammate and remember it in the draft.
    /// The team row is created first if the draft has none yet.
    RegisterTeammate {
        remote: String,
        teammate: TeammateDraft,
    },
    /// Persist a finished registration, creating its team row if it still lacks one.
    Submit(RegistrationDraft),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn reply(session: Session, response: Response) -> Self {
        Self {
            session,
            effects: vec![Effect::Reply(response)],
        }
    }
}
