//! Column sorting for the report tables.
//!
//! Each table carries one `SortState`. Header clicks go through
//! [`handle_header_click`], which returns the next set of states without
//! touching the old one. The report script does no ordering of its own: it
//! follows the table from [`transitions`] and sorts on the integer ranks from
//! [`column_ranks`].

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::types::{Issue, IssueStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableId {
    Open,
    Closed,
    All,
}

impl TableId {
    pub const ALL: [TableId; 3] = [TableId::Open, TableId::Closed, TableId::All];

    pub fn id(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::All => "All",
        }
    }

    pub fn includes(self, issue: &Issue) -> bool {
        match self {
            Self::Open => issue.status == IssueStatus::Open,
            Self::Closed => issue.status == IssueStatus::Closed,
            Self::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Date,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Number,
    Title,
    Repository,
    Status,
    Author,
    Assignee,
    Labels,
    Created,
    Updated,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Number,
        Column::Title,
        Column::Repository,
        Column::Status,
        Column::Author,
        Column::Assignee,
        Column::Labels,
        Column::Created,
        Column::Updated,
    ];

    /// Name used in `data-*` attributes and the script.
    pub fn id(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Title => "title",
            Self::Repository => "repository",
            Self::Status => "status",
            Self::Author => "author",
            Self::Assignee => "assignee",
            Self::Labels => "labels",
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::Title => "Title",
            Self::Repository => "Repository",
            Self::Status => "Status",
            Self::Author => "Author",
            Self::Assignee => "Assignee",
            Self::Labels => "Labels",
            Self::Created => "Created",
            Self::Updated => "Updated",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Self::Number => ColumnKind::Numeric,
            Self::Created | Self::Updated => ColumnKind::Date,
            Self::Title
            | Self::Repository
            | Self::Status
            | Self::Author
            | Self::Assignee
            | Self::Labels => ColumnKind::Text,
        }
    }

    /// Lowercased text key for text columns.
    pub fn text_key(self, issue: &Issue) -> String {
        let text = match self {
            Self::Title => issue.title.clone(),
            Self::Repository => issue.repository.clone(),
            Self::Status => issue.status.label().to_string(),
            Self::Author => issue.author.clone(),
            Self::Assignee => issue.assignee_display(),
            Self::Labels => issue.label_display(),
            Self::Number => issue.number.to_string(),
            Self::Created => issue.created_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
            Self::Updated => issue.updated_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
        };
        text.to_lowercase()
    }

    /// Timestamp key for date columns. Missing dates sort as `now`.
    pub fn date_key(self, issue: &Issue, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Updated => issue.updated_at.unwrap_or(now),
            _ => issue.created_at.unwrap_or(now),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn id(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// `Default` means newest-created first, whichever column was last active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Default,
    Sorted {
        column: Column,
        direction: Direction,
    },
}

impl SortState {
    /// Same column cycles Default, Ascending, Descending, Default. A different
    /// column starts over at Ascending.
    pub fn next(self, clicked: Column) -> SortState {
        match self {
            SortState::Sorted {
                column,
                direction: Direction::Ascending,
            } if column == clicked => SortState::Sorted {
                column,
                direction: Direction::Descending,
            },
            SortState::Sorted {
                column,
                direction: Direction::Descending,
            } if column == clicked => SortState::Default,
            _ => SortState::Sorted {
                column: clicked,
                direction: Direction::Ascending,
            },
        }
    }

    /// Name used by the report script: `default` or `<column>:<asc|desc>`.
    pub fn key(self) -> String {
        match self {
            SortState::Default => "default".to_string(),
            SortState::Sorted { column, direction } => {
                format!("{}:{}", column.id(), direction.id())
            }
        }
    }

    /// Every state a table can be in.
    pub fn all() -> impl Iterator<Item = SortState> {
        std::iter::once(SortState::Default).chain(Column::ALL.into_iter().flat_map(|column| {
            [Direction::Ascending, Direction::Descending]
                .map(|direction| SortState::Sorted { column, direction })
        }))
    }
}

/// Sort state of every table, keyed by table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortStates {
    states: BTreeMap<TableId, SortState>,
}

impl SortStates {
    pub fn get(&self, table: TableId) -> SortState {
        self.states.get(&table).copied().unwrap_or_default()
    }

    pub fn with(mut self, table: TableId, state: SortState) -> Self {
        let _ = self.states.insert(table, state);
        self
    }
}

/// Next states after a click on `column` in `table`. Other tables are untouched.
pub fn handle_header_click(states: &SortStates, table: TableId, column: Column) -> SortStates {
    let mut next = states.clone();
    let _ = next.states.insert(table, states.get(table).next(column));
    next
}

/// For every state `table` can be in, the state each header click leads to,
/// keyed by [`SortState::key`] and [`Column::id`].
pub fn transitions(table: TableId) -> BTreeMap<String, BTreeMap<&'static str, String>> {
    SortState::all()
        .map(|state| {
            let current = SortStates::default().with(table, state);
            let next: BTreeMap<&'static str, String> = Column::ALL
                .into_iter()
                .map(|column| {
                    let after = handle_header_click(&current, table, column);
                    (column.id(), after.get(table).key())
                })
                .collect();
            (state.key(), next)
        })
        .collect()
}

/// Dense ascending rank of each row under `column`, indexed like `rows`.
/// Equal keys share a rank, so a stable sort on the ranks keeps tied rows in
/// their current order.
pub fn column_ranks(rows: &[&Issue], column: Column, now: DateTime<Utc>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| compare(column, rows[a], rows[b], now));

    let mut ranks = vec![0; rows.len()];
    let mut rank = 0;
    for (pos, &index) in order.iter().enumerate() {
        if pos > 0 && compare(column, rows[order[pos - 1]], rows[index], now) != Ordering::Equal {
            rank += 1;
        }
        ranks[index] = rank;
    }
    ranks
}

/// Sort `rows` in place. Stable: rows with equal keys keep their current order.
pub fn sort_rows(rows: &mut [&Issue], state: SortState, now: DateTime<Utc>) {
    match state {
        SortState::Default => rows.sort_by(|a, b| default_order(a, b, now)),
        SortState::Sorted { column, direction } => rows.sort_by(|a, b| {
            let ordering = compare(column, a, b, now);
            match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        }),
    }
}

/// Newest created first; ties broken by identity so the order is total and
/// a full click cycle lands back on exactly the initial order.
pub fn default_order(a: &Issue, b: &Issue, now: DateTime<Utc>) -> Ordering {
    Column::Created
        .date_key(b, now)
        .cmp(&Column::Created.date_key(a, now))
        .then_with(|| a.repository.cmp(&b.repository))
        .then_with(|| a.number.cmp(&b.number))
}

pub fn compare(column: Column, a: &Issue, b: &Issue, now: DateTime<Utc>) -> Ordering {
    match column.kind() {
        ColumnKind::Numeric => a.number.cmp(&b.number),
        ColumnKind::Date => column.date_key(a, now).cmp(&column.date_key(b, now)),
        ColumnKind::Text => column.text_key(a).cmp(&column.text_key(b)),
    }
}
