//! Static description of where tournaments live on the source wiki.
//!
//! Each game points at one page per tier and at the selector preset of the
//! markup family that page uses. Onboarding a game means adding a [`Game`]
//! variant and its [`GameSourceConfig`]; a new markup family means adding a
//! [`LayoutSelectors`] preset.

use std::fmt;
use std::str::FromStr;

use scraper::{CaseSensitivity, ElementRef};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default origin every source path is resolved against.
pub const LIQUIPEDIA_ORIGIN: &str = "https://liquipedia.net";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    CounterStrike,
    RocketLeague,
    LeagueOfLegends,
    Valorant,
    Dota2,
    ApexLegends,
}

impl Game {
    pub const ALL: [Game; 6] = [
        Game::CounterStrike,
        Game::RocketLeague,
        Game::LeagueOfLegends,
        Game::Valorant,
        Game::Dota2,
        Game::ApexLegends,
    ];

    /// Path segment used by the wiki for this game.
    pub fn id(self) -> &'static str {
        match self {
            Game::CounterStrike => "counterstrike",
            Game::RocketLeague => "rocketleague",
            Game::LeagueOfLegends => "leagueoflegends",
            Game::Valorant => "valorant",
            Game::Dota2 => "dota2",
            Game::ApexLegends => "apexlegends",
        }
    }

    pub fn source(self) -> &'static GameSourceConfig {
        match self {
            Game::CounterStrike => &COUNTER_STRIKE,
            Game::RocketLeague => &ROCKET_LEAGUE,
            Game::LeagueOfLegends => &LEAGUE_OF_LEGENDS,
            Game::Valorant => &VALORANT,
            Game::Dota2 => &DOTA_2,
            Game::ApexLegends => &APEX_LEGENDS,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game {0:?}")]
pub struct UnknownGame(pub String);

impl FromStr for Game {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Game::ALL
            .into_iter()
            .find(|g| g.id() == wanted)
            .ok_or_else(|| UnknownGame(s.to_string()))
    }
}

/// Competitive bracket a listing page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::S => f.write_str("S-Tier"),
            Tier::A => f.write_str("A-Tier"),
        }
    }
}

/// Conjunctive set of class markers: an element matches only if it carries
/// every one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers(pub &'static [&'static str]);

impl Markers {
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let el = element.value();
        !self.0.is_empty()
            && self
                .0
                .iter()
                .all(|marker| el.has_class(marker, CaseSensitivity::CaseSensitive))
    }

    /// All descendants of `scope` (excluding `scope` itself) carrying every
    /// marker, in document order.
    pub fn find_in<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        scope
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| self.matches(el))
            .collect()
    }
}

impl fmt::Display for Markers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for marker in self.0 {
            write!(f, ".{marker}")?;
        }
        Ok(())
    }
}

/// Structural markers of one markup family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSelectors {
    pub table: Markers,
    pub row: Markers,
    pub row_title: Markers,
    pub row_date: Markers,
    pub row_prize: Markers,
    pub row_team_count: Markers,
    pub row_location: Markers,
}

/// Portal pages rendered as CSS grids (`gridTable` / `gridRow` / `gridCell`).
pub const GRID_LAYOUT: LayoutSelectors = LayoutSelectors {
    table: Markers(&["gridTable", "tournamentCard"]),
    row: Markers(&["gridRow"]),
    row_title: Markers(&["gridCell", "Tournament", "Header"]),
    row_date: Markers(&["gridCell", "EventDetails", "Date", "Header"]),
    row_prize: Markers(&["gridCell", "EventDetails", "Prize", "Header"]),
    row_team_count: Markers(&["gridCell", "EventDetails", "PlayerNumber", "Header"]),
    row_location: Markers(&["gridCell", "EventDetails", "Location", "Header"]),
};

/// Older portal pages built from nested `divTable` / `divRow` / `divCell`.
pub const DIV_LAYOUT: LayoutSelectors = LayoutSelectors {
    table: Markers(&["divTable", "table-full-width", "tournament-card"]),
    row: Markers(&["divRow"]),
    row_title: Markers(&["divCell", "Tournament", "Header"]),
    row_date: Markers(&["divCell", "EventDetails", "Date", "Header"]),
    row_prize: Markers(&["divCell", "EventDetails", "Prize", "Header"]),
    row_team_count: Markers(&["divCell", "EventDetails", "PlayerNumber", "Header"]),
    row_location: Markers(&["divCell", "EventDetails", "Location", "Header"]),
};

/// Where one game's listings live and how they are laid out.
#[derive(Debug)]
pub struct GameSourceConfig {
    pub game: Game,
    /// Tier pages, in aggregation order.
    pub tiers: &'static [(Tier, &'static str)],
    pub layout: &'static LayoutSelectors,
}

static COUNTER_STRIKE: GameSourceConfig = GameSourceConfig {
    game: Game::CounterStrike,
    tiers: &[
        (Tier::S, "/counterstrike/S-Tier_Tournaments"),
        (Tier::A, "/counterstrike/A-Tier_Tournaments"),
    ],
    layout: &GRID_LAYOUT,
};

static ROCKET_LEAGUE: GameSourceConfig = GameSourceConfig {
    game: Game::RocketLeague,
    tiers: &[
        (Tier::S, "/rocketleague/S-Tier_Tournaments"),
        (Tier::A, "/rocketleague/A-Tier_Tournaments"),
    ],
    layout: &DIV_LAYOUT,
};

static LEAGUE_OF_LEGENDS: GameSourceConfig = GameSourceConfig {
    game: Game::LeagueOfLegends,
    tiers: &[
        (Tier::S, "/leagueoflegends/S-Tier_Tournaments"),
        (Tier::A, "/leagueoflegends/A-Tier_Tournaments"),
    ],
    layout: &GRID_LAYOUT,
};

static VALORANT: GameSourceConfig = GameSourceConfig {
    game: Game::Valorant,
    tiers: &[
        (Tier::S, "/valorant/S-Tier_Tournaments"),
        (Tier::A, "/valorant/A-Tier_Tournaments"),
    ],
    layout: &GRID_LAYOUT,
};

static DOTA_2: GameSourceConfig = GameSourceConfig {
    game: Game::Dota2,
    tiers: &[
        (Tier::S, "/dota2/S-Tier_Tournaments"),
        (Tier::A, "/dota2/A-Tier_Tournaments"),
    ],
    layout: &GRID_LAYOUT,
};

static APEX_LEGENDS: GameSourceConfig = GameSourceConfig {
    game: Game::ApexLegends,
    tiers: &[
        (Tier::S, "/apexlegends/S-Tier_Tournaments"),
        (Tier::A, "/apexlegends/A-Tier_Tournaments"),
    ],
    layout: &DIV_LAYOUT,
};

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_every_game_points_at_its_own_source() {
        for game in Game::ALL {
            let source = game.source();
            assert_eq!(source.game, game);
            assert_eq!(source.tiers[0].0, Tier::S, "S-Tier is aggregated first");
            assert!(source.tiers.iter().all(|(_, p)| p.starts_with(&format!("/{game}/"))));
        }
    }

    #[test]
    fn test_game_from_str() {
        assert_eq!("valorant".parse::<Game>(), Ok(Game::Valorant));
        assert_eq!(" Dota2 ".parse::<Game>(), Ok(Game::Dota2));
        assert_eq!(
            "chess".parse::<Game>(),
            Err(UnknownGame("chess".to_string()))
        );
    }

    #[test]
    fn test_markers_require_every_class() {
        let html = Html::parse_fragment(
            r#"<div class="gridTable tournamentCard Tierless"></div>
               <div class="gridTable"></div>
               <div class="tournamentCard"></div>"#,
        );
        let found = GRID_LAYOUT.table.find_in(html.root_element());
        assert_eq!(found.len(), 1);
        assert!(found[0].value().has_class("Tierless", CaseSensitivity::CaseSensitive));
    }

    #[test]
    fn test_empty_marker_set_matches_nothing() {
        let html = Html::parse_fragment(r#"<div class="gridRow"></div>"#);
        assert!(Markers(&[]).find_in(html.root_element()).is_empty());
    }

    #[test]
    fn test_markers_display_as_css() {
        assert_eq!(GRID_LAYOUT.row_date.to_string(), ".gridCell.EventDetails.Date.Header");
    }
}
