//! Template-facing views of the domain types. Templates render in strict
//! mode, so every optional value is flattened into a flag plus a default.

use crate::handlers::prelude::*;

#[derive(Serialize, Clone, Debug, Default)]
pub struct FeedbackTmplData {
    pub present: bool,
    pub message: String,
    pub class: &'static str,
}

impl From<Option<&Feedback>> for FeedbackTmplData {
    fn from(feedback: Option<&Feedback>) -> Self {
        match feedback {
            None => Self::default(),
            Some(f) => Self {
                present: true,
                message: f.message.clone(),
                class: f.class.css_class(),
            },
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct MorpionTmplData {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub hp: i32,
    pub attack: i32,
    pub mana: i32,
    pub accuracy: i32,
    pub selected: bool,
}

impl MorpionTmplData {
    pub fn new(m: &db::morpion::Model, selected: bool) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            image_url: m.image_url.clone(),
            hp: m.hp,
            attack: m.attack,
            mana: m.mana,
            accuracy: m.accuracy,
            selected,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct GameTmplData {
    pub id: i64,
    pub team1: TeamRef,
    pub team2: TeamRef,
    pub has_winner: bool,
    pub winner: TeamRef,
    pub started_at: String,
    pub completed: bool,
    pub ended_at: String,
    pub duration: String,
    pub config: String,
}

impl From<&TeamGame> for GameTmplData {
    fn from(g: &TeamGame) -> Self {
        Self {
            id: g.game.id,
            team1: g.team1.clone(),
            team2: g.team2.clone(),
            has_winner: g.winner.is_some(),
            winner: g.winner.clone().unwrap_or_default(),
            started_at: format_time(g.game.started_at),
            completed: g.game.ended_at.is_some(),
            ended_at: g.game.ended_at.map(format_time).unwrap_or_default(),
            duration: g
                .game
                .ended_at
                .map(|end| format_duration(end - g.game.started_at))
                .unwrap_or_default(),
            config: g
                .config
                .as_ref()
                .map(|c| format!("{0}x{0} grid, {1} turns", c.grid_size, c.max_turns))
                .unwrap_or_default(),
        }
    }
}

impl From<&CompletedGame> for GameTmplData {
    fn from(g: &CompletedGame) -> Self {
        Self {
            id: g.game_id,
            team1: g.team1.clone(),
            team2: g.team2.clone(),
            has_winner: g.winner.is_some(),
            winner: g.winner.clone().unwrap_or_default(),
            started_at: format_time(g.started_at),
            completed: true,
            ended_at: format_time(g.ended_at),
            duration: format_duration(g.duration),
            config: String::new(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct TeamTmplData {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub created_at: String,
    pub morpions: Vec<MorpionTmplData>,
    pub morpion_count: usize,
    pub games: Vec<GameTmplData>,
    pub games_count: usize,
}

impl TeamTmplData {
    pub fn new(team: &TeamWithMorpions, games: &[TeamGame]) -> Self {
        Self {
            id: team.team.id,
            name: team.team.name.clone(),
            color: team.team.color.clone(),
            created_at: format_time(team.team.created_at),
            morpions: team
                .morpions
                .iter()
                .map(|m| MorpionTmplData::new(m, false))
                .collect(),
            morpion_count: team.morpion_count,
            games: games.iter().map(GameTmplData::from).collect(),
            games_count: games.len(),
        }
    }
}

impl From<&TeamEntry> for TeamTmplData {
    fn from(e: &TeamEntry) -> Self {
        Self::new(&e.team, &e.games)
    }
}

pub fn format_duration(duration: time::Duration) -> String {
    let secs = duration.whole_seconds();
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{:.3}s", duration.as_seconds_f32())
    }
}

pub fn format_time(time: time::OffsetDateTime) -> String {
    let format =
        time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    time.format(&format).unwrap_or_else(|e| {
        log::error!("Failed to format {time:?}: {e}");
        String::new()
    })
}
