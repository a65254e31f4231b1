//! Derivation of implied probabilities and scoring rates for each match.

use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter};
use tracing::{debug, warn};

use goalrate::market::Market;
use goalrate::rate::RateGrid;

use crate::domain::{Bookmaker, MatchOdds, OddsColumn};
use crate::error::{InvalidOdds, OddsDefect, ScheduleFormatError};
use crate::table::MatchTable;

/// Margin-free probabilities and the scoring rates fitted to a single match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchFit {
    /// Home, draw and away, in that order.
    pub head_to_head: Market,
    /// Over and under 2.5 goals, in that order.
    pub total_goals: Market,
    pub mu: f64,
    pub home_mu: f64,
    pub away_mu: f64,
}
impl MatchFit {
    pub fn home_prob(&self) -> f64 {
        self.head_to_head.probs[0]
    }

    pub fn draw_prob(&self) -> f64 {
        self.head_to_head.probs[1]
    }

    pub fn away_prob(&self) -> f64 {
        self.head_to_head.probs[2]
    }

    pub fn over_prob(&self) -> f64 {
        self.total_goals.probs[0]
    }

    pub fn under_prob(&self) -> f64 {
        self.total_goals.probs[1]
    }

    pub fn payout_rate(&self) -> f64 {
        self.head_to_head.payout_rate()
    }
}

/// Fits both markets and inverts the under-2.5 probability into a total scoring rate, which is
/// then apportioned between the sides.
pub fn fit_match(odds: &MatchOdds, grid: &RateGrid) -> MatchFit {
    let head_to_head = Market::fit(odds.head_to_head(), 1.0);
    let total_goals = Market::fit(odds.total_goals(), 1.0);
    let mu = grid.rate_for(total_goals.probs[1]);
    let (home_mu, away_mu) = split_rate(mu, head_to_head.probs[0], head_to_head.probs[2]);
    MatchFit {
        head_to_head,
        total_goals,
        mu,
        home_mu,
        away_mu,
    }
}

/// Splits `mu` in proportion to the home and away win probabilities; the draw plays no part.
/// The away share is the remainder, so the two always add up to `mu`.
pub fn split_rate(mu: f64, home_prob: f64, away_prob: f64) -> (f64, f64) {
    let home_mu = mu * home_prob / (home_prob + away_prob);
    (home_mu, mu - home_mu)
}

/// A column appended by [`derive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumCount, EnumIter)]
pub enum DerivedColumn {
    HomeProb,
    DrawProb,
    AwayProb,
    OverProb,
    UnderProb,
    PayoutRate,
    Mu,
    HomeMu,
    AwayMu,
}
impl DerivedColumn {
    pub fn header(&self, bookmaker: &Bookmaker) -> String {
        match self {
            DerivedColumn::HomeProb => bookmaker.column("H_prob"),
            DerivedColumn::DrawProb => bookmaker.column("D_prob"),
            DerivedColumn::AwayProb => bookmaker.column("A_prob"),
            DerivedColumn::OverProb => "OverProb".to_string(),
            DerivedColumn::UnderProb => "UnderProb".to_string(),
            DerivedColumn::PayoutRate => bookmaker.column("_pbrate"),
            DerivedColumn::Mu => "mu_val".to_string(),
            DerivedColumn::HomeMu => bookmaker.column("_h_mu"),
            DerivedColumn::AwayMu => bookmaker.column("_a_mu"),
        }
    }

    pub fn value(&self, fit: &MatchFit) -> f64 {
        match self {
            DerivedColumn::HomeProb => fit.home_prob(),
            DerivedColumn::DrawProb => fit.draw_prob(),
            DerivedColumn::AwayProb => fit.away_prob(),
            DerivedColumn::OverProb => fit.over_prob(),
            DerivedColumn::UnderProb => fit.under_prob(),
            DerivedColumn::PayoutRate => fit.payout_rate(),
            DerivedColumn::Mu => fit.mu,
            DerivedColumn::HomeMu => fit.home_mu,
            DerivedColumn::AwayMu => fit.away_mu,
        }
    }
}

/// Positions of the source odds within a table.
#[derive(Debug, Clone, PartialEq)]
pub struct OddsColumns {
    headers: [String; OddsColumn::COUNT],
    indexes: [usize; OddsColumn::COUNT],
}
impl OddsColumns {
    pub fn resolve(table: &MatchTable, bookmaker: &Bookmaker) -> Result<Self, ScheduleFormatError> {
        let mut headers: [String; OddsColumn::COUNT] = Default::default();
        let mut indexes = [0; OddsColumn::COUNT];
        for (ordinal, column) in OddsColumn::iter().enumerate() {
            let header = column.header(bookmaker);
            indexes[ordinal] = table.require(&header)?;
            headers[ordinal] = header;
        }
        Ok(Self { headers, indexes })
    }

    pub fn read(&self, table: &MatchTable, row: usize) -> Result<MatchOdds, InvalidOdds> {
        let price = |ordinal: usize| {
            parse_price(table.cell(row, self.indexes[ordinal])).map_err(|defect| InvalidOdds {
                column: self.headers[ordinal].clone(),
                defect,
            })
        };
        Ok(MatchOdds {
            home: price(0)?,
            draw: price(1)?,
            away: price(2)?,
            over: price(3)?,
            under: price(4)?,
        })
    }
}

fn parse_price(cell: &str) -> Result<f64, OddsDefect> {
    if cell.is_empty() {
        return Err(OddsDefect::Missing);
    }
    let price = cell
        .parse::<f64>()
        .map_err(|_| OddsDefect::Unparseable(cell.to_string()))?;
    if price.is_nan() || price.is_infinite() {
        Err(OddsDefect::NonFinite)
    } else if price <= 0.0 {
        Err(OddsDefect::NonPositive(price))
    } else {
        Ok(price)
    }
}

#[derive(Debug, PartialEq)]
pub struct RejectedRow {
    pub row: usize,
    pub error: InvalidOdds,
}

/// The input table augmented with the derived columns, along with the fits behind them.
#[derive(Debug)]
pub struct Derivation {
    pub table: MatchTable,
    pub fits: Vec<Option<MatchFit>>,
    pub rejected: Vec<RejectedRow>,
}
impl Derivation {
    pub fn fitted(&self) -> usize {
        self.fits.iter().filter(|fit| fit.is_some()).count()
    }
}

/// Fits every row of `table` using the odds of `bookmaker`, appending one column per
/// [`DerivedColumn`]. A row whose odds are missing or invalid is rejected and its derived cells
/// are left blank; the remaining rows are unaffected. Fails outright only if an odds column is
/// missing.
pub fn derive(
    mut table: MatchTable,
    bookmaker: &Bookmaker,
    grid: &RateGrid,
) -> Result<Derivation, ScheduleFormatError> {
    let columns = OddsColumns::resolve(&table, bookmaker)?;
    debug!("resolved odds columns {columns:?}");

    let mut fits = Vec::with_capacity(table.len());
    let mut rejected = vec![];
    for row in 0..table.len() {
        match columns.read(&table, row) {
            Ok(odds) => fits.push(Some(fit_match(&odds, grid))),
            Err(error) => {
                match table.origin_of(row) {
                    Some(origin) => warn!("skipping row {row} from {origin}: {error}"),
                    None => warn!("skipping row {row}: {error}"),
                }
                fits.push(None);
                rejected.push(RejectedRow { row, error });
            }
        }
    }

    for column in DerivedColumn::iter() {
        let values = fits
            .iter()
            .map(|fit| match fit {
                None => String::new(),
                Some(fit) => column.value(fit).to_string(),
            })
            .collect();
        table.push_column(column.header(bookmaker), values);
    }

    Ok(Derivation {
        table,
        fits,
        rejected,
    })
}
