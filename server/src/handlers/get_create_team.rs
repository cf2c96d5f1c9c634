use crate::engine::TeamForm;
use crate::handlers::prelude::*;
use crate::roster;
use crate::validation::{MAX_TEAM_SIZE, MIN_TEAM_SIZE};

#[derive(Serialize)]
struct CreateTeamTmplData<'a> {
    base_url_path: &'a str,
    feedback: FeedbackTmplData,
    team_name: &'a str,
    team_color: &'a str,
    min_team_size: usize,
    max_team_size: usize,
    morpions: Vec<MorpionTmplData>,
}

#[get("/create_team")]
pub async fn get_create_team(req: HttpRequest) -> HttpResult {
    let state = server_state(&req)?;
    render_create_team_page(state, &TeamForm::default(), None).await
}

pub async fn load_morpions<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<db::morpion::Model>, Feedback> {
    roster::get_all_morpions(db).await.map_err(|e| {
        log::error!("Failed to fetch morpions: {e}");
        Feedback::error("Error: unable to load the morpions.")
    })
}

/// Morpions whose ids were submitted in `form` are rendered checked. A
/// failure to load the morpions is reported unless `feedback` already
/// carries the outcome of a submission.
pub async fn render_create_team_page(
    state: &ServerState<'_>,
    form: &TeamForm,
    feedback: Option<&Feedback>,
) -> HttpResult {
    let (morpions, load_error) = match load_morpions(&state.db).await {
        Ok(morpions) => (morpions, None),
        Err(e) => (vec![], Some(e)),
    };
    let selected = form
        .morpion_ids
        .iter()
        .filter_map(|id| id.trim().parse::<i64>().ok())
        .collect::<HashSet<_>>();
    render(
        state,
        "create_team",
        &CreateTeamTmplData {
            base_url_path: &state.config.site_base_url_path,
            feedback: feedback.or(load_error.as_ref()).into(),
            team_name: &form.name,
            team_color: &form.color,
            min_team_size: MIN_TEAM_SIZE,
            max_team_size: MAX_TEAM_SIZE,
            morpions: morpions
                .iter()
                .map(|m| MorpionTmplData::new(m, selected.contains(&m.id)))
                .collect(),
        },
    )
}
