//! Tabulation of marks, candidates, and decisions for the console.

use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Cell, Col, Row, Table};
use strum::IntoEnumIterator;

use crate::candidate::Candidate;
use crate::decision::{Purchase, RejectReason, Rejection};
use crate::display::DisplaySlice;
use crate::marks::{Mark, Marks};
use crate::odds::OddsTable;
use crate::ticket::Ticket;

pub fn tabulate_marks(marks: &Marks) -> Table {
    Table::default()
        .with_cols(
            Mark::iter()
                .map(|_| Col::new(Styles::default().with(MinWidth(3)).with(HAlign::Centred)))
                .collect(),
        )
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            Mark::iter().map(|mark| Cell::from(mark.symbol().to_string())).collect(),
        ))
        .with_row(Row::new(
            Styles::default(),
            Mark::iter()
                .map(|mark| Cell::from(marks.entrant(mark).to_string()))
                .collect(),
        ))
}

pub fn tabulate_candidates(candidates: &[Candidate]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(17)).with(HAlign::Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Set".into(), "Tickets".into()],
        ));
    for candidate in candidates {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                candidate.label.to_string().into(),
                DisplaySlice::plus(&candidate.tickets).to_string().into(),
            ],
        ));
    }
    table
}

/// Lists the `required` tickets alongside their quotes in `odds`, if any.
pub fn tabulate_required(required: &[Ticket], odds: &OddsTable) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Ticket".into(), "Odds".into()],
        ));
    for ticket in required {
        let quote = match odds.get(ticket) {
            None => "-".into(),
            Some(odds) => format!("{:.2}", odds.decimal()),
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![ticket.to_string().into(), quote.into()],
        ));
    }
    table
}

pub fn tabulate_plan(purchase: &Purchase) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Ticket".into(),
                "Odds".into(),
                "Stake".into(),
                "Return".into(),
            ],
        ));
    for (index, ticket) in purchase.tickets.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                ticket.to_string().into(),
                format!("{:.2}", purchase.odds[index].decimal()).into(),
                purchase.stakes[index].to_string().into(),
                format!("{:.0}", purchase.returns[index].round()).into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Header(true)),
        vec![
            "Total".into(),
            "".into(),
            purchase.total_stake.to_string().into(),
            format!("min {:.0}", purchase.min_return.round()).into(),
        ],
    ));
    table
}

pub fn tabulate_trail(trail: &[Rejection]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(17)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Set".into(),
                "Tickets".into(),
                "Status".into(),
                "Detail".into(),
            ],
        ));
    for rejection in trail {
        let (status, detail) = match &rejection.reason {
            RejectReason::NoOdds { missing } => {
                ("NO_ODDS", format!("missing: {}", DisplaySlice::comma(missing)))
            }
            RejectReason::Unaffordable { needs, needs_sum } => (
                "NG",
                format!("needs: {} (sum {needs_sum})", DisplaySlice::comma(needs)),
            ),
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                rejection.label.to_string().into(),
                DisplaySlice::plus(&rejection.tickets).to_string().into(),
                status.into(),
                detail.into(),
            ],
        ));
    }
    table
}
