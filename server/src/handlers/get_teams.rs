use crate::handlers::prelude::*;

#[derive(Serialize)]
struct PendingDeletionTmplData {
    team: TeamTmplData,
    games: Vec<GameTmplData>,
}

#[derive(Serialize)]
struct TeamsTmplData<'a> {
    base_url_path: &'a str,
    feedback: FeedbackTmplData,
    teams: Vec<TeamTmplData>,
    awaiting_confirmation: bool,
    pending: Option<PendingDeletionTmplData>,
}

#[get("/teams")]
pub async fn get_teams(req: HttpRequest) -> HttpResult {
    let state = server_state(&req)?;
    match load_teams(&state.db).await {
        Ok(teams) => render_teams_page(state, &teams, None, None),
        Err(feedback) => render_teams_page(state, &[], Some(&feedback), None),
    }
}

/// The error is what the page shows in place of the listing.
pub async fn load_teams<C: ConnectionTrait>(db: &C) -> Result<Vec<TeamEntry>, Feedback> {
    engine::list_teams_with_games(db).await.map_err(|e| {
        log::error!("Failed to fetch teams: {e}");
        Feedback::error("Error: unable to load the teams.")
    })
}

pub fn render_teams_page(
    state: &ServerState,
    teams: &[TeamEntry],
    feedback: Option<&Feedback>,
    pending: Option<(&TeamWithMorpions, &[TeamGame])>,
) -> HttpResult {
    render(
        state,
        "teams",
        &TeamsTmplData {
            base_url_path: &state.config.site_base_url_path,
            feedback: feedback.into(),
            teams: teams.iter().map(TeamTmplData::from).collect(),
            awaiting_confirmation: pending.is_some(),
            pending: pending.map(|(team, games)| PendingDeletionTmplData {
                team: TeamTmplData::new(team, games),
                games: games.iter().map(GameTmplData::from).collect(),
            }),
        },
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::MessageClass;
    use crate::testing;
    use time::macros::datetime;

    #[tokio::test]
    async fn test_load_teams() {
        let db = testing::test_db().await;
        testing::insert_team(&db, "Reds", "red", datetime!(2024-01-01 0:00 UTC)).await;
        let teams = load_teams(&db).await.expect("Failed to load teams");
        assert_eq!(teams.len(), 1);

        db.execute_unprepared("DROP TABLE team_morpion")
            .await
            .expect("Failed to drop team_morpion");
        let feedback = load_teams(&db).await.unwrap_err();
        assert_eq!(feedback.class, MessageClass::Error);
        assert_eq!(feedback.message, "Error: unable to load the teams.");
    }
}
