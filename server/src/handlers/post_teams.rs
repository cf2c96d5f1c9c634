use crate::engine::DeletionState;
use crate::handlers::get_teams::{load_teams, render_teams_page};
use crate::handlers::prelude::*;

#[derive(Deserialize, Debug)]
pub struct DeleteTeamForm {
    team_id: Option<String>,
    confirm_delete_games: Option<String>,
}

#[post("/teams")]
pub async fn post_teams(req: HttpRequest, form: web::Form<DeleteTeamForm>) -> HttpResult {
    let state = server_state(&req)?;
    let teams = match load_teams(&state.db).await {
        Ok(teams) => teams,
        Err(feedback) => return render_teams_page(state, &[], Some(&feedback), None),
    };
    // Without a team there is nothing to delete: show the listing.
    let Some(team_id) = form.team_id.as_deref() else {
        return render_teams_page(state, &teams, None, None);
    };
    let outcome = engine::request_team_deletion(
        &state.db,
        &teams,
        team_id,
        form.confirm_delete_games.as_deref(),
    )
    .await;
    let teams = match outcome.refreshed_teams {
        Some(ref refreshed) => refreshed,
        None => &teams,
    };
    let pending = match outcome.state {
        DeletionState::AwaitingConfirmation {
            ref team,
            ref games,
        } => Some((team, games.as_slice())),
        DeletionState::Idle | DeletionState::Resolved => None,
    };
    render_teams_page(state, teams, Some(&outcome.feedback), pending)
}
