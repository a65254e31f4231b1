use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use strum_macros::{EnumCount, EnumIter};
use thiserror::Error;

/// A competition code as used by the football-data.co.uk archive, e.g., `E0` for the English
/// Premier League or `D1` for the Bundesliga.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct League(String);
impl League {
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl FromStr for League {
    type Err = InvalidLeague;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(InvalidLeague(s.to_string()));
        }
        Ok(Self(code.to_uppercase()))
    }
}

impl Display for League {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid league code '{0}'")]
pub struct InvalidLeague(String);

/// A season, identified by the year in which it finishes. The 2016/17 season is `Season(2017)`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Season(u16);
impl Season {
    pub const EARLIEST: u16 = 1994;
    pub const LATEST: u16 = 2099;

    pub fn ending(year: u16) -> Result<Self, InvalidSeason> {
        if (Self::EARLIEST..=Self::LATEST).contains(&year) {
            Ok(Self(year))
        } else {
            Err(InvalidSeason(year.to_string()))
        }
    }

    pub fn ending_year(&self) -> u16 {
        self.0
    }

    pub fn starting_year(&self) -> u16 {
        self.0 - 1
    }

    /// The archive's directory name for the season: the last two digits of the starting year
    /// followed by the last two digits of the ending year, e.g., `1617`.
    pub fn path_segment(&self) -> String {
        format!("{:02}{:02}", self.starting_year() % 100, self.0 % 100)
    }
}

impl FromStr for Season {
    type Err = InvalidSeason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let year = s.trim().parse::<u16>().map_err(|_| InvalidSeason(s.to_string()))?;
        Self::ending(year).map_err(|_| InvalidSeason(s.to_string()))
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{:02}", self.starting_year(), self.0 % 100)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error(
    "invalid season '{0}': expected the year in which the season ends, between {} and {}",
    Season::EARLIEST,
    Season::LATEST
)]
pub struct InvalidSeason(String);

/// Where a table of matches was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    Archive { league: League, season: Season },
    File(PathBuf),
}

impl Display for Origin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Archive { league, season } => write!(f, "{league} {season}"),
            Origin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The prefix of the odds columns to read. `BbAv` selects the market average across bookmakers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bookmaker(String);
impl Bookmaker {
    pub const MARKET_AVERAGE: &'static str = "BbAv";

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// The name of a column belonging to this bookmaker, e.g., `BbAvH` for the suffix `H`.
    pub fn column(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.0)
    }
}

impl Default for Bookmaker {
    fn default() -> Self {
        Self(Self::MARKET_AVERAGE.to_string())
    }
}

impl FromStr for Bookmaker {
    type Err = InvalidBookmaker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.is_empty() || tag.contains(',') {
            return Err(InvalidBookmaker(s.to_string()));
        }
        Ok(Self(tag.to_string()))
    }
}

impl Display for Bookmaker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid bookmaker tag '{0}'")]
pub struct InvalidBookmaker(String);

/// The source odds consumed from each row.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EnumCount, EnumIter)]
pub enum OddsColumn {
    Home,
    Draw,
    Away,
    Over,
    Under,
}
impl OddsColumn {
    /// Over/under prices are always read from the market-average columns, regardless of the
    /// bookmaker selected for the match result.
    pub const OVER: &'static str = "BbAv>2.5";
    pub const UNDER: &'static str = "BbAv<2.5";

    pub fn header(&self, bookmaker: &Bookmaker) -> String {
        match self {
            OddsColumn::Home => bookmaker.column("H"),
            OddsColumn::Draw => bookmaker.column("D"),
            OddsColumn::Away => bookmaker.column("A"),
            OddsColumn::Over => Self::OVER.to_string(),
            OddsColumn::Under => Self::UNDER.to_string(),
        }
    }
}

/// Decimal prices for the match result and the 2.5 total-goals line.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOdds {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
    pub over: f64,
    pub under: f64,
}
impl MatchOdds {
    pub fn head_to_head(&self) -> Vec<f64> {
        vec![self.home, self.draw, self.away]
    }

    pub fn total_goals(&self) -> Vec<f64> {
        vec![self.over, self.under]
    }
}
