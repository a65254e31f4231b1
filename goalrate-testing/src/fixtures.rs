//! CSV excerpts laid out like the football-data.co.uk archive. Odds are illustrative.

/// Three Premier League rows with the columns the derivation consumes, followed by the empty
/// trailing lines the archive files often carry.
pub const E0_1617: &str = "\
Div,Date,HomeTeam,AwayTeam,FTHG,FTAG,FTR,BbAvH,BbAvD,BbAvA,BbAv>2.5,BbAv<2.5
E0,13/08/16,Burnley,Swansea,0,1,A,2.0,3.0,4.0,1.9,1.9
E0,13/08/16,Crystal Palace,West Brom,0,1,A,1.5,4.2,7.0,1.6,2.4
E0,13/08/16,Everton,Tottenham,1,1,D,3.1,3.3,2.4,2.1,1.75
,,,,,,,,,,,
";

/// The following season, carrying an extra column (`Referee`) and one row with a blank home price.
pub const E0_1718: &str = "\
Div,Date,HomeTeam,AwayTeam,FTHG,FTAG,FTR,Referee,BbAvH,BbAvD,BbAvA,BbAv>2.5,BbAv<2.5
E0,11/08/17,Arsenal,Leicester,4,3,H,M Dean,1.5,4.2,7.0,1.6,2.4
E0,12/08/17,Brighton,Man City,0,2,A,M Oliver,,5.5,1.3,1.7,2.2
";

/// A season whose over/under columns are absent.
pub const E0_MISSING_TOTALS: &str = "\
Div,Date,HomeTeam,AwayTeam,FTHG,FTAG,FTR,BbAvH,BbAvD,BbAvA
E0,13/08/16,Burnley,Swansea,0,1,A,2.0,3.0,4.0
";
