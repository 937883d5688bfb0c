use sqlx::Error;

use crate::{database::NewTeam, types::DbConn, util};

pub async fn insert_team(db: &DbConn, team: &NewTeam) -> Result<i64, Error> {
  log::debug!("insert_team: {:?}", team);

  let result = sqlx::query(
    "INSERT INTO teams (team_name, game, created_at) \
      VALUES ($1, $2, $3)",
  )
  .bind(&team.team_name)
  .bind(&team.game)
  .bind(util::get_unix())
  .execute(db)
  .await?;

  let team_id = result.last_insert_rowid();

  log::debug!("insert_team done: {:?}", team_id);

  Ok(team_id)
}
