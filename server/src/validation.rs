use std::collections::HashSet;

pub const MIN_TEAM_SIZE: usize = 6;
pub const MAX_TEAM_SIZE: usize = 8;

pub fn validate_team_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Error: the team name is required.".to_owned());
    }
    Ok(())
}

pub fn validate_team_color(color: &str) -> Result<(), String> {
    if color.is_empty() {
        return Err("Error: the team color is required.".to_owned());
    }
    Ok(())
}

pub fn validate_selection_size(n: usize) -> Result<(), String> {
    if n == 0 {
        return Err("Error: you must select at least one morpion.".to_owned());
    }
    if n < MIN_TEAM_SIZE {
        return Err(format!(
            "Error: you must select at least {MIN_TEAM_SIZE} morpions (currently {n})."
        ));
    }
    if n > MAX_TEAM_SIZE {
        return Err(format!(
            "Error: you cannot select more than {MAX_TEAM_SIZE} morpions (currently {n})."
        ));
    }
    Ok(())
}

fn parse_positive_id(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Each morpion may appear once: repeats would let a short selection pass
/// the size check.
pub fn parse_morpion_ids(ids: &[String]) -> Result<Vec<i64>, String> {
    let mut seen = HashSet::with_capacity(ids.len());
    let mut parsed = Vec::with_capacity(ids.len());
    for s in ids {
        let id = parse_positive_id(s)
            .ok_or_else(|| format!("Error: invalid morpion identifier '{}'.", s.trim()))?;
        if !seen.insert(id) {
            return Err(format!("Error: morpion {id} is selected more than once."));
        }
        parsed.push(id);
    }
    Ok(parsed)
}

pub fn parse_team_id(s: &str) -> Result<i64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Error: no team identifier provided.".to_owned());
    }
    parse_positive_id(s).ok_or_else(|| "Error: invalid team identifier.".to_owned())
}
