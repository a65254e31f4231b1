//! Acquisition of historical results and odds from the football-data.co.uk archive.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::domain::{League, Origin, Season};
use crate::error::{FetchError, HistoryError};
use crate::table::MatchTable;

pub const ARCHIVE_URL: &str = "https://www.football-data.co.uk/mmz4281";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The location of a league's CSV file for a given season, e.g.,
/// `https://www.football-data.co.uk/mmz4281/1617/E0.csv` for `E0` in 2016/17.
pub fn season_url(base_url: &str, league: &League, season: Season) -> String {
    format!(
        "{}/{}/{}.csv",
        base_url.trim_end_matches('/'),
        season.path_segment(),
        league.code()
    )
}

/// Supplies one table of matches per league and season.
#[async_trait]
pub trait MatchSource: Sync {
    async fn fetch_season(&self, league: &League, season: Season) -> Result<MatchTable, HistoryError>;
}

/// Downloads tables from the archive over HTTP.
#[derive(Debug, Clone)]
pub struct FootballData {
    client: reqwest::Client,
    base_url: String,
}
impl FootballData {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(ARCHIVE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl MatchSource for FootballData {
    async fn fetch_season(&self, league: &League, season: Season) -> Result<MatchTable, HistoryError> {
        let url = season_url(&self.base_url, league, season);
        debug!("downloading {url}");
        let transport = |source| FetchError::Transport {
            league: league.clone(),
            season,
            source,
        };
        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                league: league.clone(),
                season,
                url,
                status,
            }
            .into());
        }
        let body = response.bytes().await.map_err(transport)?;
        debug!("downloaded {} bytes from {url}", body.len());

        let origin = Origin::Archive {
            league: league.clone(),
            season,
        };
        Ok(MatchTable::read_csv(origin, &body[..])?)
    }
}

/// Reads previously downloaded tables from disk, one file per season.
#[derive(Debug, Clone, Default)]
pub struct CsvFiles {
    files: FxHashMap<Season, PathBuf>,
}
impl CsvFiles {
    /// Pairs each season with the file at the same position.
    pub fn new(seasons: &[Season], files: Vec<PathBuf>) -> Self {
        Self {
            files: seasons.iter().copied().zip(files).collect(),
        }
    }
}

#[async_trait]
impl MatchSource for CsvFiles {
    async fn fetch_season(&self, league: &League, season: Season) -> Result<MatchTable, HistoryError> {
        let path = self.files.get(&season).ok_or_else(|| FetchError::NoFile {
            league: league.clone(),
            season,
        })?;
        debug!("reading {league} {season} from {path:?}");
        let bytes = tokio::fs::read(path).await.map_err(|source| FetchError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(MatchTable::read_csv(Origin::File(path.clone()), bytes.as_slice())?)
    }
}

/// Fetches the tables for all `seasons` of `league` concurrently and stacks them in the order
/// the seasons were given. The first failure aborts the lot.
pub async fn fetch<S: MatchSource + ?Sized>(
    source: &S,
    league: &League,
    seasons: &[Season],
) -> Result<MatchTable, HistoryError> {
    let tables = try_join_all(
        seasons
            .iter()
            .map(|&season| source.fetch_season(league, season)),
    )
    .await?;
    for (season, table) in seasons.iter().zip(&tables) {
        info!("fetched {} matches for {league} {season}", table.len());
    }
    Ok(MatchTable::concat(tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalrate_testing::fixtures;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn league() -> League {
        League::from_str("E0").unwrap()
    }

    fn season(year: u16) -> Season {
        Season::ending(year).unwrap()
    }

    /// Serves fixtures from memory, completing earlier seasons last.
    struct InMemory {
        csvs: FxHashMap<Season, &'static str>,
        calls: AtomicUsize,
    }
    impl InMemory {
        fn new(csvs: impl IntoIterator<Item = (u16, &'static str)>) -> Self {
            Self {
                csvs: csvs.into_iter().map(|(year, csv)| (season(year), csv)).collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MatchSource for InMemory {
        async fn fetch_season(&self, league: &League, season: Season) -> Result<MatchTable, HistoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = u64::from(Season::LATEST - season.ending_year());
            sleep(Duration::from_millis(delay)).await;
            let csv = self.csvs.get(&season).ok_or_else(|| FetchError::NoFile {
                league: league.clone(),
                season,
            })?;
            let origin = Origin::Archive {
                league: league.clone(),
                season,
            };
            Ok(MatchTable::read_csv(origin, csv.as_bytes())?)
        }
    }

    #[test]
    fn url_for_season() {
        assert_eq!(
            "https://www.football-data.co.uk/mmz4281/1617/E0.csv",
            season_url(ARCHIVE_URL, &league(), season(2017))
        );
        assert_eq!(
            "http://localhost:8080/9900/D1.csv",
            season_url("http://localhost:8080/", &League::from_str("D1").unwrap(), season(2000))
        );
    }

    #[tokio::test]
    async fn fetch_preserves_season_order() {
        let source = InMemory::new([(2017, fixtures::E0_1617), (2018, fixtures::E0_1718)]);
        let table = fetch(&source, &league(), &[season(2018), season(2017)]).await.unwrap();
        assert_eq!(2, source.calls.load(Ordering::SeqCst));
        assert_eq!(5, table.len());
        let home_team = table.column_index("HomeTeam").unwrap();
        assert_eq!("Arsenal", table.cell(0, home_team));
        assert_eq!("Burnley", table.cell(2, home_team));
        assert_eq!(
            Some(&Origin::Archive {
                league: league(),
                season: season(2017)
            }),
            table.origin_of(2)
        );
    }

    #[tokio::test]
    async fn fetch_single_season() {
        let source = InMemory::new([(2017, fixtures::E0_1617)]);
        let table = fetch(&source, &league(), &[season(2017)]).await.unwrap();
        assert_eq!(3, table.len());
    }

    #[tokio::test]
    async fn fetch_aborts_on_failure() {
        let source = InMemory::new([(2017, fixtures::E0_1617)]);
        let err = fetch(&source, &league(), &[season(2017), season(2019)]).await.unwrap_err();
        assert!(matches!(err, HistoryError::Fetch(FetchError::NoFile { .. })));
        assert_eq!("no file supplied for E0 2018/19", err.to_string());
    }

    #[tokio::test]
    async fn fetch_and_derive() {
        use crate::domain::Bookmaker;
        use crate::fit::derive;
        use goalrate::rate::RateGrid;

        let source = InMemory::new([(2017, fixtures::E0_1617), (2018, fixtures::E0_1718)]);
        let table = fetch(&source, &league(), &[season(2017), season(2018)]).await.unwrap();
        let derivation = derive(table, &Bookmaker::default(), &RateGrid::default()).unwrap();
        assert_eq!(4, derivation.fitted());
        assert_eq!(1, derivation.rejected.len());
        assert_eq!(
            Some(&Origin::Archive {
                league: league(),
                season: season(2018)
            }),
            derivation.table.origin_of(derivation.rejected[0].row)
        );
        let mu = derivation.table.column_index("mu_val").unwrap();
        assert_eq!("3.103103103103103", derivation.table.cell(3, mu));
    }

    #[tokio::test]
    async fn csv_files_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("E0.csv");
        tokio::fs::write(&path, fixtures::E0_1617).await.unwrap();
        let source = CsvFiles::new(&[season(2017)], vec![path.clone()]);
        let table = fetch(&source, &league(), &[season(2017)]).await.unwrap();
        assert_eq!(3, table.len());
        assert_eq!(Some(&Origin::File(path)), table.origin_of(0));
    }

    #[tokio::test]
    async fn csv_files_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvFiles::new(&[season(2017)], vec![dir.path().join("missing.csv")]);
        let err = fetch(&source, &league(), &[season(2017)]).await.unwrap_err();
        assert!(matches!(err, HistoryError::Fetch(FetchError::Io { .. })));
    }

    #[tokio::test]
    async fn csv_files_unmatched_season() {
        let source = CsvFiles::new(&[season(2017)], vec![]);
        let err = fetch(&source, &league(), &[season(2017)]).await.unwrap_err();
        assert!(matches!(err, HistoryError::Fetch(FetchError::NoFile { .. })));
    }

    async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn football_data_downloads_season() {
        let server = MockServer::start().await;
        serve(&server, "/1617/E0.csv", ResponseTemplate::new(200).set_body_string(fixtures::E0_1617)).await;
        let source = FootballData::with_base_url(server.uri()).unwrap();
        let table = source.fetch_season(&league(), season(2017)).await.unwrap();
        assert_eq!(3, table.len());
        assert_eq!("Burnley", table.cell(0, table.column_index("HomeTeam").unwrap()));
        assert_eq!(
            Some(&Origin::Archive {
                league: league(),
                season: season(2017)
            }),
            table.origin_of(0)
        );
    }

    #[tokio::test]
    async fn football_data_fetches_seasons_in_order() {
        let server = MockServer::start().await;
        serve(&server, "/1617/E0.csv", ResponseTemplate::new(200).set_body_string(fixtures::E0_1617)).await;
        serve(
            &server,
            "/1718/E0.csv",
            ResponseTemplate::new(200)
                .set_body_string(fixtures::E0_1718)
                .set_delay(Duration::from_millis(20)),
        )
        .await;
        let source = FootballData::with_base_url(format!("{}/", server.uri())).unwrap();
        let table = fetch(&source, &league(), &[season(2018), season(2017)]).await.unwrap();
        assert_eq!(5, table.len());
        let home_team = table.column_index("HomeTeam").unwrap();
        assert_eq!("Arsenal", table.cell(0, home_team));
        assert_eq!("Burnley", table.cell(2, home_team));
    }

    #[tokio::test]
    async fn football_data_rejects_unsuccessful_status() {
        let server = MockServer::start().await;
        serve(&server, "/1617/E0.csv", ResponseTemplate::new(404)).await;
        let source = FootballData::with_base_url(server.uri()).unwrap();
        let err = source.fetch_season(&league(), season(2017)).await.unwrap_err();
        match &err {
            HistoryError::Fetch(FetchError::Status { status, url, .. }) => {
                assert_eq!(reqwest::StatusCode::NOT_FOUND, *status);
                assert_eq!(&format!("{}/1617/E0.csv", server.uri()), url);
            }
            other => panic!("unexpected error {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("E0 2016/17"), "{message}");
        assert!(message.contains("404"), "{message}");
    }

    #[tokio::test]
    async fn football_data_reports_transport_failure() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let source = FootballData::with_base_url(format!("http://127.0.0.1:{port}")).unwrap();
        let err = source.fetch_season(&league(), season(2017)).await.unwrap_err();
        assert!(
            matches!(err, HistoryError::Fetch(FetchError::Transport { .. })),
            "unexpected error {err:?}"
        );
        assert!(err.to_string().starts_with("request for E0 2016/17 failed"));
    }
}
