/// A finished registration as it is written to the `users` table.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct PersistedUser {
    pub name: String,
    pub group_num: String,
    pub tg_link: Option<String>,
    pub steam_link: String,
    pub st_card_photo: String,
    pub game: String,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub is_captain: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct NewTeam {
    pub team_name: String,
    pub game: String,
}
