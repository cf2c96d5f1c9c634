//! Team creation and deletion workflows. Every call ends in exactly one
//! `Feedback` for the page that triggered it.

use sea_orm::{ConnectionTrait, DbErr};

use crate::roster::{self, TeamGame, TeamWithMorpions};
use crate::validation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageClass {
    Success,
    Error,
    Warning,
    Info,
}

impl MessageClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageClass::Success => "alert-success",
            MessageClass::Error => "alert-error",
            MessageClass::Warning => "alert-warning",
            MessageClass::Info => "alert-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub class: MessageClass,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            class: MessageClass::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            class: MessageClass::Error,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            class: MessageClass::Warning,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            class: MessageClass::Info,
        }
    }
}

const CREATE_FAILED: &str = "Error: unable to create the team.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamForm {
    pub name: String,
    pub color: String,
    pub morpion_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreationOutcome {
    pub feedback: Feedback,
    pub team_id: Option<i64>,
    /// What the form should show next: the submitted values after a
    /// failure, empty after a success.
    pub form: TeamForm,
}

impl CreationOutcome {
    fn rejected(message: impl Into<String>, form: TeamForm) -> Self {
        Self {
            feedback: Feedback::error(message),
            team_id: None,
            form,
        }
    }
}

pub async fn submit_team_form<C: ConnectionTrait>(db: &C, form: TeamForm) -> CreationOutcome {
    let form = TeamForm {
        name: form.name.trim().to_owned(),
        color: form.color.trim().to_owned(),
        morpion_ids: form.morpion_ids,
    };
    if let Err(e) = validation::validate_team_name(&form.name) {
        return CreationOutcome::rejected(e, form);
    }
    if let Err(e) = validation::validate_team_color(&form.color) {
        return CreationOutcome::rejected(e, form);
    }
    match check_duplicates(db, &form).await {
        Ok(None) => {}
        Ok(Some(e)) => return CreationOutcome::rejected(e, form),
        Err(e) => {
            log::error!("Failed to check whether team {:?} exists: {e}", form.name);
            return CreationOutcome::rejected(CREATE_FAILED, form);
        }
    }
    if let Err(e) = validation::validate_selection_size(form.morpion_ids.len()) {
        return CreationOutcome::rejected(e, form);
    }
    let morpion_ids = match validation::parse_morpion_ids(&form.morpion_ids) {
        Ok(ids) => ids,
        Err(e) => return CreationOutcome::rejected(e, form),
    };
    let Some(team_id) = roster::create_team(db, &form.name, &form.color).await else {
        return CreationOutcome::rejected(CREATE_FAILED, form);
    };
    let Some(added) = roster::add_morpions_to_team(db, team_id, &morpion_ids).await else {
        log::warn!("Team {team_id} was created without its morpions");
        return CreationOutcome {
            feedback: Feedback::error(
                "Error: the team was created but its morpions could not be added.",
            ),
            team_id: Some(team_id),
            form,
        };
    };
    CreationOutcome {
        feedback: Feedback::success(format!(
            "Team '{}' was created successfully with {added} morpion(s)!",
            form.name
        )),
        team_id: Some(team_id),
        form: TeamForm::default(),
    }
}

async fn check_duplicates<C: ConnectionTrait>(
    db: &C,
    form: &TeamForm,
) -> Result<Option<String>, DbErr> {
    if roster::team_name_color_exists(db, &form.name, &form.color).await? {
        return Ok(Some(format!(
            "Error: a team named '{}' with color '{}' already exists.",
            form.name, form.color
        )));
    }
    if roster::team_color_exists(db, &form.color).await? {
        return Ok(Some(format!(
            "Error: a team with color '{}' already exists (colors must be unique).",
            form.color
        )));
    }
    Ok(None)
}

/// A row of the team listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamEntry {
    pub team: TeamWithMorpions,
    pub games: Vec<TeamGame>,
}

pub async fn list_teams_with_games<C: ConnectionTrait>(db: &C) -> Result<Vec<TeamEntry>, DbErr> {
    let teams = roster::get_all_teams_with_morpions(db).await?;
    let mut entries = Vec::with_capacity(teams.len());
    for team in teams {
        let games = roster::get_games_for_team(db, team.team.id).await?;
        entries.push(TeamEntry { team, games });
    }
    Ok(entries)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeletionState {
    /// Nothing was attempted.
    Idle,
    /// The team is used in games and the caller must confirm that they
    /// go too.
    AwaitingConfirmation {
        team: TeamWithMorpions,
        games: Vec<TeamGame>,
    },
    Resolved,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub feedback: Feedback,
    pub state: DeletionState,
    /// Set after a successful deletion.
    pub refreshed_teams: Option<Vec<TeamEntry>>,
}

impl DeletionOutcome {
    fn idle(feedback: Feedback) -> Self {
        Self {
            feedback,
            state: DeletionState::Idle,
            refreshed_teams: None,
        }
    }

    fn resolved(feedback: Feedback) -> Self {
        Self {
            feedback,
            state: DeletionState::Resolved,
            refreshed_teams: None,
        }
    }
}

/// `teams` is the listing the request was made from; the team is looked up
/// there. `confirm` is the answer to a previous `AwaitingConfirmation`,
/// "yes" (any case) meaning delete the games too.
pub async fn request_team_deletion<C: ConnectionTrait>(
    db: &C,
    teams: &[TeamEntry],
    team_id: &str,
    confirm: Option<&str>,
) -> DeletionOutcome {
    let team_id = match validation::parse_team_id(team_id) {
        Ok(id) => id,
        Err(e) => return DeletionOutcome::idle(Feedback::error(e)),
    };
    let Some(entry) = teams.iter().find(|e| e.team.team.id == team_id) else {
        return DeletionOutcome::idle(Feedback::error("Error: team not found."));
    };
    let name = &entry.team.team.name;
    let games = match roster::get_games_for_team(db, team_id).await {
        Ok(games) => games,
        Err(e) => {
            log::error!("Failed to fetch games of team {team_id}: {e}");
            return DeletionOutcome::resolved(Feedback::error(format!(
                "Error while deleting: {e}"
            )));
        }
    };
    if games.is_empty() {
        return delete_and_refresh(
            db,
            team_id,
            false,
            format!("Team '{name}' was deleted successfully!"),
            "Error: unable to delete the team.",
        )
        .await;
    }
    let Some(confirm) = confirm else {
        return DeletionOutcome {
            feedback: Feedback::warning(format!(
                "Team '{name}' is used in {} game(s). Do you also want to delete these games?",
                games.len()
            )),
            state: DeletionState::AwaitingConfirmation {
                team: entry.team.clone(),
                games,
            },
            refreshed_teams: None,
        };
    };
    if !confirm.trim().eq_ignore_ascii_case("yes") {
        return DeletionOutcome::resolved(Feedback::info(
            "Deletion cancelled: the team is kept because it is used in games.",
        ));
    }
    delete_and_refresh(
        db,
        team_id,
        true,
        format!(
            "Team '{name}' and its {} associated game(s) were deleted successfully!",
            games.len()
        ),
        "Error: unable to delete the team and its games.",
    )
    .await
}

async fn delete_and_refresh<C: ConnectionTrait>(
    db: &C,
    team_id: i64,
    cascade_games: bool,
    success: String,
    failure: &str,
) -> DeletionOutcome {
    match roster::delete_team(db, team_id, cascade_games).await {
        Ok(true) => DeletionOutcome {
            feedback: Feedback::success(success),
            state: DeletionState::Resolved,
            refreshed_teams: list_teams_with_games(db)
                .await
                .inspect_err(|e| log::error!("Failed to reload teams after deletion: {e}"))
                .ok(),
        },
        Ok(false) => DeletionOutcome::resolved(Feedback::error(failure)),
        Err(e) => DeletionOutcome::resolved(Feedback::error(format!("Error while deleting: {e}"))),
    }
}
