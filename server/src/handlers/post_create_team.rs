use actix_multipart::form::{text::Text, MultipartForm};

use crate::engine::TeamForm;
use crate::handlers::get_create_team::render_create_team_page;
use crate::handlers::prelude::*;

#[derive(Debug, MultipartForm)]
struct CreateTeamForm {
    team_name: Text<String>,
    team_color: Text<String>,
    morpions: Vec<Text<String>>,
}

#[post("/create_team")]
pub async fn post_create_team(
    MultipartForm(form): MultipartForm<CreateTeamForm>,
    req: HttpRequest,
) -> HttpResult {
    let state = server_state(&req)?;
    let outcome = engine::submit_team_form(
        &state.db,
        TeamForm {
            name: form.team_name.into_inner(),
            color: form.team_color.into_inner(),
            morpion_ids: form.morpions.into_iter().map(Text::into_inner).collect(),
        },
    )
    .await;
    if let Some(team_id) = outcome.team_id {
        log::info!("Team {team_id} submitted: {}", outcome.feedback.message);
    }
    render_create_team_page(state, &outcome.form, Some(&outcome.feedback)).await
}
