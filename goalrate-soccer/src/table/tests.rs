use super::*;
use crate::domain::{League, Season};
use goalrate_testing::fixtures;
use std::str::FromStr;

fn archive(season: u16) -> Origin {
    Origin::Archive {
        league: League::from_str("E0").unwrap(),
        season: Season::ending(season).unwrap(),
    }
}

fn read(season: u16, csv: &str) -> MatchTable {
    MatchTable::read_csv(archive(season), csv.as_bytes()).unwrap()
}

#[test]
fn read_skips_blank_rows() {
    let table = read(2017, fixtures::E0_1617);
    assert_eq!(12, table.headers().len());
    assert_eq!(3, table.len());
    assert_eq!(Some(2), table.column_index("HomeTeam"));
    assert_eq!("Burnley", table.cell(0, 2));
    assert_eq!("1.75", table.cell(2, table.column_index("BbAv<2.5").unwrap()));
    assert_eq!(1, table.segments().len());
    assert_eq!(0..3, table.segments()[0].rows);
}

#[test]
fn read_pads_short_rows_and_truncates_long_ones() {
    let csv = "Div,HomeTeam,AwayTeam\nE0,Arsenal\nE0,Chelsea,Spurs,extra\n";
    let table = read(2017, csv);
    assert_eq!(&["E0", "Arsenal", ""], table.rows()[0].as_slice());
    assert_eq!(&["E0", "Chelsea", "Spurs"], table.rows()[1].as_slice());
}

#[test]
fn read_strips_byte_order_mark_and_whitespace() {
    let csv = "\u{feff}Div, HomeTeam \nE0, Arsenal \n";
    let table = read(2017, csv);
    assert_eq!(&["Div", "HomeTeam"], table.headers());
    assert_eq!("Arsenal", table.cell(0, 1));
}

#[test]
fn read_tolerates_latin1() {
    let mut csv = b"Div,HomeTeam\nSP1,".to_vec();
    csv.extend_from_slice(&[b'M', b'\xe1', b'l', b'a', b'g', b'a']);
    csv.push(b'\n');
    let table = MatchTable::read_csv(archive(2017), csv.as_slice()).unwrap();
    assert_eq!(1, table.len());
    assert!(table.cell(0, 1).starts_with('M'));
    assert!(table.cell(0, 1).ends_with("laga"));
}

#[test]
fn duplicate_headers_resolve_to_first() {
    let table = read(2017, "Div,Odds,Odds\nE0,1.5,2.5\n");
    assert_eq!(Some(1), table.column_index("Odds"));
    assert_eq!("1.5", table.cell(0, table.column_index("Odds").unwrap()));
}

#[test]
fn concat_unions_columns_in_order() {
    let table = MatchTable::concat([read(2017, fixtures::E0_1617), read(2018, fixtures::E0_1718)]);
    assert_eq!(5, table.len());
    assert_eq!(13, table.headers().len());
    assert_eq!("Referee", table.headers()[12]);

    let referee = table.column_index("Referee").unwrap();
    assert_eq!("", table.cell(0, referee));
    assert_eq!("M Dean", table.cell(3, referee));

    let home_team = table.column_index("HomeTeam").unwrap();
    assert_eq!("Everton", table.cell(2, home_team));
    assert_eq!("Arsenal", table.cell(3, home_team));

    let home_price = table.column_index("BbAvH").unwrap();
    assert_eq!("1.5", table.cell(3, home_price));
    assert_eq!("", table.cell(4, home_price));
    assert!(table.rows().iter().all(|row| row.len() == 13));
}

#[test]
fn concat_tracks_origins() {
    let table = MatchTable::concat([read(2017, fixtures::E0_1617), read(2018, fixtures::E0_1718)]);
    assert_eq!(2, table.segments().len());
    assert_eq!(0..3, table.segments()[0].rows);
    assert_eq!(3..5, table.segments()[1].rows);
    assert_eq!(Some(&archive(2017)), table.origin_of(2));
    assert_eq!(Some(&archive(2018)), table.origin_of(3));
    assert_eq!(None, table.origin_of(5));
}

#[test]
fn concat_empty() {
    let table = MatchTable::concat([]);
    assert!(table.is_empty());
    assert!(table.headers().is_empty());
}

#[test]
fn require_present_column() {
    let table = MatchTable::concat([read(2017, fixtures::E0_1617), read(2018, fixtures::E0_1718)]);
    assert_eq!(Ok(2), table.require("HomeTeam").map_err(|err| err.to_string()));
}

#[test]
fn require_column_absent_from_one_source() {
    let table = MatchTable::concat([read(2018, fixtures::E0_1718), read(2017, fixtures::E0_MISSING_TOTALS)]);
    assert_eq!(
        "missing column 'BbAv>2.5' in data from E0 2016/17",
        table.require("BbAv>2.5").unwrap_err().to_string()
    );
}

#[test]
fn require_column_absent_everywhere() {
    let table = read(2017, fixtures::E0_1617);
    assert!(matches!(
        table.require("PSH"),
        Err(ScheduleFormatError::MissingColumn { column, .. }) if column == "PSH"
    ));
    assert!(matches!(
        MatchTable::default().require("PSH"),
        Err(ScheduleFormatError::EmptyTable { .. })
    ));
}

#[test]
fn push_column() {
    let mut table = read(2017, fixtures::E0_1617);
    table.push_column("mu_val".into(), vec!["1".into(), "2".into(), "3".into()]);
    assert_eq!(13, table.headers().len());
    assert_eq!(Some(12), table.column_index("mu_val"));
    assert_eq!("3", table.cell(2, 12));
}

#[test]
#[should_panic(expected = "number of values 1 does not match number of rows 3")]
fn push_column_length_mismatch() {
    let mut table = read(2017, fixtures::E0_1617);
    table.push_column("mu_val".into(), vec!["1".into()]);
}
