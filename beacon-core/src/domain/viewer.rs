//! Viewer identity
//!
//! Who is looking at the dashboard. Identity is established by the external
//! authentication layer; here only the team membership matters.

use serde::{Deserialize, Serialize};

use crate::domain::team::Team;

/// The viewer of a dashboard session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "team", rename_all = "lowercase")]
pub enum Viewer {
    /// Not authenticated; sees exposed pipelines only
    Anonymous,

    /// Authenticated as a member of the named team
    Team(String),
}

impl Viewer {
    /// Builds a viewer from an optional team name
    ///
    /// Blank names are treated as anonymous.
    pub fn from_team(team: Option<&str>) -> Self {
        match team.map(str::trim) {
            Some(name) if !name.is_empty() => Viewer::Team(name.to_string()),
            _ => Viewer::Anonymous,
        }
    }

    pub fn team_name(&self) -> Option<&str> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Team(name) => Some(name),
        }
    }

    /// Whether the viewer belongs to the named team
    pub fn is_member_of(&self, team: &str) -> bool {
        self.team_name() == Some(team)
    }

    /// Whether the viewer's team exists among `teams`
    pub fn is_known(&self, teams: &[Team]) -> bool {
        match self {
            Viewer::Anonymous => true,
            Viewer::Team(name) => teams.iter().any(|t| &t.name == name),
        }
    }

    /// Resolves the viewer against the known teams
    ///
    /// A viewer claiming a team that does not exist gets the anonymous view.
    pub fn resolve(&self, teams: &[Team]) -> Viewer {
        if self.is_known(teams) {
            self.clone()
        } else {
            Viewer::Anonymous
        }
    }
}

impl std::fmt::Display for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Viewer::Anonymous => write!(f, "anonymous"),
            Viewer::Team(name) => write!(f, "team:{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn team(name: &str) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: name.to_string(),
            pipelines: vec![],
        }
    }

    #[test]
    fn test_blank_team_is_anonymous() {
        assert_eq!(Viewer::from_team(None), Viewer::Anonymous);
        assert_eq!(Viewer::from_team(Some("  ")), Viewer::Anonymous);
        assert_eq!(
            Viewer::from_team(Some(" main ")),
            Viewer::Team("main".to_string())
        );
    }

    #[test]
    fn test_unknown_team_resolves_to_anonymous() {
        let teams = vec![team("main")];
        let ghost = Viewer::Team("ghost".to_string());

        assert!(!ghost.is_known(&teams));
        assert_eq!(ghost.resolve(&teams), Viewer::Anonymous);
        assert_eq!(
            Viewer::Team("main".to_string()).resolve(&teams),
            Viewer::Team("main".to_string())
        );
    }
}
