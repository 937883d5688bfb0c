use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::state::TeammateDraft;

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[А-Яа-яЁё ]{1,100}$").expect("Failed to compile name regex"));

static GROUP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-ZА-ЯЁ -]{1,20}$").expect("Failed to compile group regex"));

static STEAM_LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://steamcommunity\.com/\S+$").expect("Failed to compile steam link regex")
});

static TG_HANDLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@?[A-Za-z][A-Za-z0-9_]{4,31}$").expect("Failed to compile telegram handle regex")
});

const TEAM_NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must be 1-100 cyrillic letters or spaces")]
    Name,
    #[error("group must be 1-20 uppercase letters, digits, dashes or spaces")]
    Group,
    #[error("steam link must start with https://steamcommunity.com/")]
    SteamLink,
    #[error("telegram handle must be 5-32 latin letters, digits or underscores")]
    TelegramHandle,
    #[error("teammate record must have 4 lines, got {0}")]
    LineCount(usize),
}

fn not_blank(text: &str) -> bool {
    !text.trim().is_empty()
}

pub fn is_valid_name(text: &str) -> bool {
    not_blank(text) && NAME_REGEX.is_match(text)
}

pub fn is_valid_group(text: &str) -> bool {
    not_blank(text) && GROUP_REGEX.is_match(text)
}

pub fn is_valid_steam_link(text: &str) -> bool {
    STEAM_LINK_REGEX.is_match(text)
}

pub fn is_valid_tg_handle(text: &str) -> bool {
    TG_HANDLE_REGEX.is_match(text)
}

pub fn is_valid_team_name(text: &str) -> bool {
    not_blank(text) && text.chars().count() <= TEAM_NAME_MAX_CHARS
}

/// Parses the four line teammate caption: name, group, steam link, telegram handle.
///
/// Blank lines are skipped and each line is trimmed. The photo reference is
/// left empty, it is filled once the attachment has been fetched.
pub fn parse_teammate(caption: &str) -> Result<TeammateDraft, ValidationError> {
    let lines: Vec<&str> = caption
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let [name, group, steam_link, tg_link] = lines.as_slice() else {
        return Err(ValidationError::LineCount(lines.len()));
    };

    if !is_valid_name(name) {
        return Err(ValidationError::Name);
    }
    if !is_valid_group(group) {
        return Err(ValidationError::Group);
    }
    if !is_valid_steam_link(steam_link) {
        return Err(ValidationError::SteamLink);
    }
    if !is_valid_tg_handle(tg_link) {
        return Err(ValidationError::TelegramHandle);
    }

    Ok(TeammateDraft {
        name: name.to_string(),
        group_num: group.to_string(),
        steam_link: steam_link.to_string(),
        tg_link: tg_link.to_string(),
        st_card_photo: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_cyrillic_words() {
        assert!(is_valid_name("Иванов Иван Иванович"));
        assert!(is_valid_name("Ёлкин Пётр"));
        assert!(!is_valid_name("Ivanov Ivan"));
        assert!(!is_valid_name("Иванов1"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name(&"я".repeat(101)));
        assert!(is_valid_name(&"я".repeat(100)));
    }

    #[test]
    fn groups_are_short_uppercase_codes() {
        assert!(is_valid_group("ИУ5-21"));
        assert!(is_valid_group("IU5-21B"));
        assert!(is_valid_group("ИУ5 21"));
        assert!(!is_valid_group("иу5-21"));
        assert!(!is_valid_group(""));
        assert!(!is_valid_group(" "));
        assert!(!is_valid_group(&"A".repeat(21)));
    }

    #[test]
    fn steam_link_needs_exact_prefix() {
        assert!(is_valid_steam_link("https://steamcommunity.com/id/test"));
        assert!(is_valid_steam_link("https://steamcommunity.com/profiles/76561198000000000"));
        assert!(!is_valid_steam_link("not-a-url"));
        assert!(!is_valid_steam_link("http://steamcommunity.com/id/test"));
        assert!(!is_valid_steam_link("https://steamcommunityXcom/id/test"));
        assert!(!is_valid_steam_link("https://evil.example/https://steamcommunity.com/id/x"));
        assert!(!is_valid_steam_link("https://steamcommunity.com/"));
        assert!(!is_valid_steam_link("https://steamcommunity.com/id/te st"));
    }

    #[test]
    fn telegram_handles() {
        assert!(is_valid_tg_handle("@petrov_p"));
        assert!(is_valid_tg_handle("petrov_p"));
        assert!(!is_valid_tg_handle("@abc"));
        assert!(!is_valid_tg_handle("@1petrov"));
        assert!(!is_valid_tg_handle("@петров"));
    }

    #[test]
    fn team_names_are_any_non_blank_text() {
        assert!(is_valid_team_name("Team Alpha"));
        assert!(is_valid_team_name("Команда №1 🚀"));
        assert!(!is_valid_team_name("  "));
        assert!(!is_valid_team_name(&"x".repeat(101)));
    }

    #[test]
    fn parses_teammate_caption() {
        let teammate = parse_teammate(
            "Петров Пётр\n  ИУ5-22 \n\nhttps://steamcommunity.com/id/petrov\n@petrov_p\n",
        )
        .unwrap();

        assert_eq!(teammate.name, "Петров Пётр");
        assert_eq!(teammate.group_num, "ИУ5-22");
        assert_eq!(teammate.steam_link, "https://steamcommunity.com/id/petrov");
        assert_eq!(teammate.tg_link, "@petrov_p");
        assert!(teammate.st_card_photo.is_empty());
    }

    #[test]
    fn rejects_malformed_teammate_caption() {
        assert_eq!(
            parse_teammate("Петров Пётр\nИУ5-22"),
            Err(ValidationError::LineCount(2))
        );
        assert_eq!(
            parse_teammate("Petrov\nИУ5-22\nhttps://steamcommunity.com/id/p\n@petrov_p"),
            Err(ValidationError::Name)
        );
        assert_eq!(
            parse_teammate("Петров Пётр\nИУ5-22\nsteam\n@petrov_p"),
            Err(ValidationError::SteamLink)
        );
        assert_eq!(
            parse_teammate("Петров Пётр\nИУ5-22\nhttps://steamcommunity.com/id/p\n@p"),
            Err(ValidationError::TelegramHandle)
        );
    }
}
