use teloxide::utils::{command::BotCommands as _, html};

use crate::lexicon::*;

use super::event::{Command, Effect, Event, Inbound, Response, Transition};
use super::state::{RegistrationDraft, RegistrationState, Session};
use super::validate;

const CANCEL_ONLY: &[&str] = &[CANCEL_BUTTON];
const CONFIRM_OPTIONS: &[&str] = &[YES_STOP_BUTTON, NO_STOP_BUTTON];
const MAIN_OPTIONS: &[&str] = &[REGISTER_BUTTON];
const GAME_KEYBOARD: &[&str] = &[GAME_OPTIONS[0], GAME_OPTIONS[1], CANCEL_BUTTON];
const TEAM_OR_SOLO_OPTIONS: &[&str] = &[TEAM_BUTTON, SOLO_BUTTON, CANCEL_BUTTON];
const TEAMMATE_OPTIONS: &[&str] = &[ADD_TEAMMATE_BUTTON, TEAM_DONE_BUTTON, CANCEL_BUTTON];

/// Keyboard shown while the session waits in `state`.
pub fn options_for(state: RegistrationState) -> &'static [&'static str] {
    match state {
        RegistrationState::Idle => MAIN_OPTIONS,
        RegistrationState::FillGame => GAME_KEYBOARD,
        RegistrationState::TeamOrSolo => TEAM_OR_SOLO_OPTIONS,
        RegistrationState::AddTeammate => TEAMMATE_OPTIONS,
        RegistrationState::FillName
        | RegistrationState::FillGroup
        | RegistrationState::FillSteamLink
        | RegistrationState::FillPhoto
        | RegistrationState::FillTeamName
        | RegistrationState::FillTeammateData => CANCEL_ONLY,
    }
}

/// The question asked for the field `state` is waiting for.
pub fn prompt_for(state: RegistrationState) -> &'static str {
    match state {
        RegistrationState::Idle => IDLE_HINT,
        RegistrationState::FillName => ASK_NAME,
        RegistrationState::FillGroup => ASK_GROUP,
        RegistrationState::FillSteamLink => ASK_STEAM_LINK,
        RegistrationState::FillPhoto => ASK_PHOTO,
        RegistrationState::FillGame => ASK_GAME,
        RegistrationState::TeamOrSolo => ASK_TEAM_OR_SOLO,
        RegistrationState::FillTeamName => ASK_TEAM_NAME,
        RegistrationState::AddTeammate => ASK_TEAMMATES,
        RegistrationState::FillTeammateData => ASK_TEAMMATE_DATA,
    }
}

fn current_options(session: &Session) -> &'static [&'static str] {
    if session.confirming_cancel {
        CONFIRM_OPTIONS
    } else {
        options_for(session.state)
    }
}

/// The prompt of the current step, used when the step has to be repeated.
pub fn current_prompt(session: &Session) -> Response {
    if session.confirming_cancel {
        return Response::new(CONFIRM_CANCEL, CONFIRM_OPTIONS);
    }
    Response::new(prompt_for(session.state), options_for(session.state))
}

fn invalid_format(session: &Session) -> Transition {
    Transition::reply(
        session.clone(),
        Response::new(
            format!("{}\n\n{}", INVALID_FORMAT, prompt_for(session.state)),
            options_for(session.state),
        ),
    )
}

fn advance(session: &Session, next: RegistrationState, draft: RegistrationDraft) -> Transition {
    Transition::reply(
        Session {
            state: next,
            draft,
            confirming_cancel: false,
        },
        Response::new(
            format!("{}\n\n{}", DATA_SAVED, prompt_for(next)),
            options_for(next),
        ),
    )
    .tap_log(session)
}

impl Transition {
    fn tap_log(self, previous: &Session) -> Self {
        log::debug!(
            "Transition {:?} -> {:?}",
            previous.state,
            self.session.state
        );
        self
    }
}

/// Buttons arrive as plain text, map the ones that stand for commands.
fn normalize(session: &Session, event: &Event) -> Event {
    match event {
        Event::Text(text) if text == CANCEL_BUTTON => Event::Command(Command::Cancel),
        Event::Text(text) if text == REGISTER_BUTTON && session.is_idle() => {
            Event::Command(Command::Register)
        }
        Event::Text(text) if session.confirming_cancel && text == YES_STOP_BUTTON => {
            Event::CancelConfirm(true)
        }
        Event::Text(text) if session.confirming_cancel && text == NO_STOP_BUTTON => {
            Event::CancelConfirm(false)
        }
        other => other.clone(),
    }
}

/// Computes the next session and the effects for one incoming event.
///
/// Invalid input never advances the state: the returned session equals the
/// given one and the only effect is a re-prompt.
pub fn transition(session: &Session, inbound: &Inbound) -> Transition {
    let event = normalize(session, &inbound.event);

    match &event {
        Event::Command(Command::Start) => {
            return Transition::reply(
                session.clone(),
                Response::new(START, current_options(session)),
            );
        }
        Event::UnknownCommand => {
            return Transition::reply(
                session.clone(),
                Response::new(UNKNOWN_COMMAND, current_options(session)),
            );
        }
        Event::Command(Command::Help) => {
            return Transition::reply(
                session.clone(),
                Response::new(
                    format!("{}\n\n{}", HELP, Command::descriptions()),
                    current_options(session),
                ),
            );
        }
        _ => {}
    }

    if session.confirming_cancel {
        return confirm_cancel(session, &event);
    }

    match &event {
        Event::Command(Command::Cancel) if session.is_idle() => {
            return Transition::reply(
                session.clone(),
                Response::new(NOTHING_TO_CANCEL, MAIN_OPTIONS),
            );
        }
        Event::Command(Command::Cancel) => {
            log::debug!("Asking to confirm cancel in {:?}", session.state);
            return Transition::reply(
                Session {
                    confirming_cancel: true,
                    ..session.clone()
                },
                Response::new(CONFIRM_CANCEL, CONFIRM_OPTIONS),
            );
        }
        Event::Command(Command::Register) if !session.is_idle() => {
            return Transition::reply(
                session.clone(),
                Response::new(ALREADY_REGISTERING, options_for(session.state)),
            );
        }
        _ => {}
    }

    match session.state {
        RegistrationState::Idle => idle(session, inbound, &event),
        RegistrationState::FillName => {
            fill_text(session, &event, validate::is_valid_name, |draft, text| {
                draft.name = text.to_string();
            })
        }
        RegistrationState::FillGroup => {
            fill_text(session, &event, validate::is_valid_group, |draft, text| {
                draft.group_num = text.to_string();
            })
        }
        RegistrationState::FillSteamLink => {
            fill_text(session, &event, validate::is_valid_steam_link, |draft, text| {
                draft.steam_link = text.to_string();
            })
        }
        RegistrationState::FillPhoto => fill_photo(session, &event),
        RegistrationState::FillGame => fill_game(session, &event),
        RegistrationState::TeamOrSolo => team_or_solo(session, &event),
        RegistrationState::FillTeamName => fill_team_name(session, &event),
        RegistrationState::AddTeammate => add_teammate(session, &event),
        RegistrationState::FillTeammateData => fill_teammate_data(session, &event),
    }
}

fn confirm_cancel(session: &Session, event: &Event) -> Transition {
    match event {
        Event::CancelConfirm(true) => {
            log::debug!("Registration cancelled in {:?}", session.state);
            Transition::reply(
                Session::default(),
                Response::new(REGISTRATION_STOPPED, MAIN_OPTIONS),
            )
        }
        Event::CancelConfirm(false) => Transition::reply(
            Session {
                confirming_cancel: false,
                ..session.clone()
            },
            Response::new(
                format!("{}\n\n{}", REGISTRATION_RESUMED, prompt_for(session.state)),
                options_for(session.state),
            ),
        ),
        _ => Transition::reply(session.clone(), Response::new(CONFIRM_CANCEL, CONFIRM_OPTIONS)),
    }
}

fn idle(session: &Session, inbound: &Inbound, event: &Event) -> Transition {
    match event {
        Event::Command(Command::Register) => {
            let draft = RegistrationDraft {
                tg_link: inbound.sender_handle.clone(),
                is_captain: true,
                ..Default::default()
            };
            log::debug!(
                "Starting registration for {:?} ({:?})",
                inbound.chat_id,
                inbound.sender_handle
            );
            Transition::reply(
                Session {
                    state: RegistrationState::FillName,
                    draft,
                    confirming_cancel: false,
                },
                Response::new(
                    format!("{}\n\n{}", REGISTRATION_STARTED, ASK_NAME),
                    CANCEL_ONLY,
                ),
            )
        }
        _ => Transition::reply(session.clone(), Response::new(IDLE_HINT, MAIN_OPTIONS)),
    }
}

fn next_state(state: RegistrationState) -> RegistrationState {
    match state {
        RegistrationState::FillName => RegistrationState::FillGroup,
        RegistrationState::FillGroup => RegistrationState::FillSteamLink,
        RegistrationState::FillSteamLink => RegistrationState::FillPhoto,
        RegistrationState::FillPhoto => RegistrationState::FillGame,
        RegistrationState::FillGame => RegistrationState::TeamOrSolo,
        RegistrationState::FillTeamName => RegistrationState::AddTeammate,
        other => other,
    }
}

fn fill_text<V, S>(session: &Session, event: &Event, is_valid: V, store: S) -> Transition
where
    V: Fn(&str) -> bool,
    S: FnOnce(&mut RegistrationDraft, &str),
{
    match event {
        Event::Text(text) if is_valid(text) => {
            let mut draft = session.draft.clone();
            store(&mut draft, text);
            advance(session, next_state(session.state), draft)
        }
        _ => invalid_format(session),
    }
}

fn fill_photo(session: &Session, event: &Event) -> Transition {
    let Event::Photo { file_id, .. } = event else {
        return invalid_format(session);
    };

    let mut transition = advance(session, RegistrationState::FillGame, session.draft.clone());
    transition.effects.insert(
        0,
        Effect::FetchStudentCard {
            remote: file_id.clone(),
        },
    );
    transition
}

fn fill_game(session: &Session, event: &Event) -> Transition {
    match event {
        Event::Text(game) if GAME_OPTIONS.contains(&game.as_str()) => {
            let mut draft = session.draft.clone();
            draft.game = game.clone();
            Transition::reply(
                session.with_state(RegistrationState::TeamOrSolo).with_draft(draft),
                Response::new(
                    format!("{}\n\n{}", game_selected(game), ASK_TEAM_OR_SOLO),
                    TEAM_OR_SOLO_OPTIONS,
                ),
            )
            .tap_log(session)
        }
        _ => invalid_format(session),
    }
}

fn team_or_solo(session: &Session, event: &Event) -> Transition {
    match event {
        Event::Text(choice) if choice == TEAM_BUTTON => {
            let mut draft = session.draft.clone();
            draft.team_id = None;
            draft.team_name = None;
            draft.teammates.clear();
            Transition::reply(
                session.with_state(RegistrationState::FillTeamName).with_draft(draft),
                Response::new(ASK_TEAM_NAME, CANCEL_ONLY),
            )
            .tap_log(session)
        }
        Event::Text(choice) if choice == SOLO_BUTTON => {
            let mut draft = session.draft.clone();
            draft.team_id = None;
            draft.team_name = None;
            Transition {
                session: Session::default(),
                effects: vec![
                    Effect::Submit(draft),
                    Effect::Reply(Response::new(SOLO_REGISTERED, MAIN_OPTIONS)),
                ],
            }
            .tap_log(session)
        }
        _ => invalid_format(session),
    }
}

fn fill_team_name(session: &Session, event: &Event) -> Transition {
    match event {
        Event::Text(name) if validate::is_valid_team_name(name) => {
            let mut draft = session.draft.clone();
            draft.team_name = Some(name.clone());
            Transition::reply(
                session.with_state(RegistrationState::AddTeammate).with_draft(draft),
                Response::new(ASK_TEAMMATES, TEAMMATE_OPTIONS),
            )
            .tap_log(session)
        }
        _ => invalid_format(session),
    }
}

fn add_teammate(session: &Session, event: &Event) -> Transition {
    match event {
        Event::Text(choice) if choice == ADD_TEAMMATE_BUTTON => Transition::reply(
            session.with_state(RegistrationState::FillTeammateData),
            Response::new(ASK_TEAMMATE_DATA, CANCEL_ONLY),
        )
        .tap_log(session),
        Event::Text(choice) if choice == TEAM_DONE_BUTTON => {
            let team_name = session.draft.team_name.clone().unwrap_or_default();
            Transition {
                session: Session::default(),
                effects: vec![
                    Effect::Submit(session.draft.clone()),
                    Effect::Reply(Response::new(
                        team_registered(&team_name, session.draft.teammates.len()),
                        MAIN_OPTIONS,
                    )),
                ],
            }
            .tap_log(session)
        }
        _ => invalid_format(session),
    }
}

fn fill_teammate_data(session: &Session, event: &Event) -> Transition {
    let (file_id, caption) = match event {
        Event::Photo {
            file_id,
            caption: Some(caption),
        } if !caption.trim().is_empty() => (file_id, caption),
        _ => {
            return Transition::reply(
                session.clone(),
                Response::new(
                    format!("{}\n\n{}", ASK_COMBINED_MESSAGE, ASK_TEAMMATE_DATA),
                    CANCEL_ONLY,
                ),
            );
        }
    };

    match validate::parse_teammate(caption) {
        Ok(teammate) => {
            let added = session.draft.teammates.len() + 1;
            Transition {
                session: session.with_state(RegistrationState::AddTeammate),
                effects: vec![
                    Effect::RegisterTeammate {
                        remote: file_id.clone(),
                        teammate: teammate.clone(),
                    },
                    Effect::Reply(Response::new(
                        format!(
                            "{}\n\n{}",
                            teammate_added(&teammate.name, added),
                            ASK_TEAMMATES
                        ),
                        TEAMMATE_OPTIONS,
                    )),
                ],
            }
            .tap_log(session)
        }
        Err(e) => {
            log::debug!("Rejected teammate caption {:?}: {}", caption, e);
            Transition::reply(
                session.clone(),
                Response::new(
                    format!(
                        "{} ({})\n\n{}",
                        INVALID_FORMAT,
                        html::escape(&e.to_string()),
                        ASK_TEAMMATE_DATA
                    ),
                    CANCEL_ONLY,
                ),
            )
        }
    }
}

impl Session {
    fn with_draft(self, draft: RegistrationDraft) -> Self {
        Self { draft, ..self }
    }
}
