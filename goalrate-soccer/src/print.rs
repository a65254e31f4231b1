use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};
use strum::EnumCount;

use crate::fit::{DerivedColumn, Derivation};

/// The augmented table in full: every source column in the order read, followed by the derived
/// columns, which are right-aligned. Cells are printed as stored; rejected rows show blank
/// derived cells.
pub fn tabulate_derivation(derivation: &Derivation) -> Table {
    let table = &derivation.table;
    let derived_from = table.headers().len().saturating_sub(DerivedColumn::COUNT);
    let cols = (0..table.headers().len())
        .map(|column| {
            if column < derived_from {
                Col::new(Styles::default().with(MinWidth(5)).with(Left))
            } else {
                Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right))
            }
        })
        .collect();
    let mut tabulated = Table::default().with_cols(cols).with_row(Row::new(
        Styles::default().with(Header(true)),
        table.headers().iter().map(|header| header.clone().into()).collect(),
    ));
    for row in table.rows() {
        tabulated.push_row(Row::new(
            Styles::default(),
            row.iter().map(|cell| cell.clone().into()).collect(),
        ));
    }
    tabulated
}

/// Per-source counts of fitted and rejected rows.
pub fn tabulate_summary(derivation: &Derivation) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Source".into(), "Rows".into(), "Fitted".into(), "Rejected".into()],
        ));
    for segment in derivation.table.segments() {
        let fitted = derivation.fits[segment.rows.clone()]
            .iter()
            .filter(|fit| fit.is_some())
            .count();
        table.push_row(Row::new(
            Styles::default(),
            vec![
                segment.origin.to_string().into(),
                format!("{}", segment.rows.len()).into(),
                format!("{fitted}").into(),
                format!("{}", segment.rows.len() - fitted).into(),
            ],
        ));
    }
    table
}
