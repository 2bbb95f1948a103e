use sea_orm::ConnectionTrait;

use crate::domain::snapshot::SessionSnapshot;
use crate::errors::domain::DomainError;
use crate::repos;
use crate::services::session_snapshot;

const MAX_NAME_LEN: usize = 30;

fn normalize_name(name: Option<String>, which: &str) -> Result<Option<String>, DomainError> {
    let Some(name) = name else {
        return Ok(None);
    };
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "{which} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Draw two grids at random, create the session, and initialize all 50
/// ledger rows atomically.
pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player1_name: Option<String>,
    player2_name: Option<String>,
) -> Result<SessionSnapshot, DomainError> {
    let player1_name = normalize_name(player1_name, "player_1_name")?;
    let player2_name = normalize_name(player2_name, "player_2_name")?;

    let (grid1, grid2) = repos::grids::pick_two_random(conn).await?;
    let session =
        repos::sessions::create(conn, grid1.id, grid2.id, player1_name, player2_name).await?;
    repos::cells::create_initial(conn, session.id).await?;

    session_snapshot::assemble(conn, &session).await
}

#[cfg(test)]
mod tests {
    use super::normalize_name;

    #[test]
    fn blank_names_become_none() {
        assert_eq!(normalize_name(None, "n").unwrap(), None);
        assert_eq!(normalize_name(Some("   ".into()), "n").unwrap(), None);
    }

    #[test]
    fn names_are_trimmed() {
        assert_eq!(
            normalize_name(Some("  Ada  ".into()), "n").unwrap().as_deref(),
            Some("Ada")
        );
    }

    #[test]
    fn overlong_names_are_rejected() {
        let name = "x".repeat(31);
        assert!(normalize_name(Some(name), "player_1_name").is_err());
    }
}
