use crate::handlers::prelude::*;
use crate::stats::{self, LandingPageStats, TableCount, TeamWins};

#[derive(Serialize)]
struct MonthlyLogsTmplData {
    period: String,
    avg_logs: String,
}

#[derive(Serialize)]
struct MainPageTmplData<'a> {
    base_url_path: &'a str,
    feedback: FeedbackTmplData,
    counts: Vec<TableCount>,
    top_teams: Vec<TeamWins>,
    has_fastest: bool,
    fastest: Option<GameTmplData>,
    has_longest: bool,
    longest: Option<GameTmplData>,
    avg_logs: Vec<MonthlyLogsTmplData>,
}

#[get("/")]
pub async fn get_index(req: HttpRequest) -> HttpResult {
    let state = server_state(&req)?;
    let LandingPageStats {
        counts,
        top_teams,
        fastest_game,
        longest_game,
        avg_logs,
    } = stats::landing_page_stats(
        &state.db,
        state.stats_config.table_names.as_slice(),
        state.stats_config.top_limit,
    )
    .await;
    render(
        state,
        "main",
        &MainPageTmplData {
            base_url_path: &state.config.site_base_url_path,
            feedback: FeedbackTmplData::default(),
            counts,
            top_teams,
            has_fastest: fastest_game.is_some(),
            fastest: fastest_game.as_ref().map(GameTmplData::from),
            has_longest: longest_game.is_some(),
            longest: longest_game.as_ref().map(GameTmplData::from),
            avg_logs: avg_logs
                .into_iter()
                .map(|a| MonthlyLogsTmplData {
                    period: format!("{}-{:02}", a.year, a.month),
                    avg_logs: format!("{:.2}", a.avg_logs),
                })
                .collect(),
        },
    )
}
