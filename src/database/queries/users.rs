use sqlx::Error;

use crate::{database::PersistedUser, types::DbConn, util};

pub async fn insert_user(db: &DbConn, user: &PersistedUser) -> Result<i64, Error> {
  log::debug!("insert_user: {:?}", user);

  let result = sqlx::query(
    "INSERT INTO users \
      (name, group_num, tg_link, steam_link, st_card_photo, game, team_id, team_name, is_captain, created_at) \
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
  )
  .bind(&user.name)
  .bind(&user.group_num)
  .bind(&user.tg_link)
  .bind(&user.steam_link)
  .bind(&user.st_card_photo)
  .bind(&user.game)
  .bind(user.team_id)
  .bind(&user.team_name)
  .bind(user.is_captain)
  .bind(util::get_unix())
  .execute(db)
  .await?;

  let user_id = result.last_insert_rowid();

  log::debug!("insert_user done: {:?}", user_id);

  Ok(user_id)
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::database::{self, queries, NewTeam};

  async fn get_user(db: &DbConn, user_id: i64) -> Option<PersistedUser> {
    sqlx::query_as(
      "SELECT name, group_num, tg_link, steam_link, st_card_photo, game, team_id, team_name, is_captain \
        FROM users WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .unwrap()
  }

  fn solo_captain() -> PersistedUser {
    PersistedUser {
      name: "Иванов Иван Иванович".to_string(),
      group_num: "ИУ5-21".to_string(),
      tg_link: None,
      steam_link: "https://steamcommunity.com/id/test".to_string(),
      st_card_photo: "images/card-1.jpg".to_string(),
      game: "CS".to_string(),
      team_id: None,
      team_name: None,
      is_captain: true,
    }
  }

  #[tokio::test]
  async fn stores_every_field() {
    let db = database::open_in_memory().await.unwrap();

    let user = solo_captain();
    let user_id = insert_user(&db, &user).await.unwrap();

    assert_eq!(get_user(&db, user_id).await, Some(user));
  }

  #[tokio::test]
  async fn team_members_reference_their_team() {
    let db = database::open_in_memory().await.unwrap();

    let team_id = queries::insert_team(
      &db,
      &NewTeam {
        team_name: "Team Alpha".to_string(),
        game: "Dota 2".to_string(),
      },
    )
    .await
    .unwrap();

    let teammate = PersistedUser {
      name: "Петров Пётр".to_string(),
      tg_link: Some("@petrov_p".to_string()),
      team_id: Some(team_id),
      team_name: Some("Team Alpha".to_string()),
      is_captain: false,
      ..solo_captain()
    };
    let first = insert_user(&db, &teammate).await.unwrap();
    let second = insert_user(&db, &solo_captain()).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(get_user(&db, first).await, Some(teammate));
  }
}
