mod add;
mod budget;
mod list;
mod report;

use anyhow::anyhow;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_till};
use nom::character::complete::{char, multispace1};
use nom::combinator::{all_consuming, value};
use nom::error::ErrorKind;
use nom::sequence::{delimited, preceded, tuple};
use nom::{IResult, InputTakeAtPosition};

use crate::record::Kind;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement {
    /// ADD INCOME|EXPENSE amount [ON date] [CATEGORY 'x'] [NOTE 'y']
    Add(AddArgs),
    /// BUDGET [month] [limit]
    Budget(Option<String>, Option<String>),
    /// SUMMARY [month]
    Summary(Option<String>),
    /// LIST [MONTH prefix] [CATEGORY 'x'] [TYPE income|expense]
    List(Filters),
    /// EXPORT [filters] TO file_path
    Export(Filters, String),
    /// BREAKDOWN [month]
    Breakdown(Option<String>),
    Categories,
    Help,
}

/// Raw arguments of ADD. Amount and date stay as text until validated.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AddArgs {
    pub(crate) kind: Kind,
    pub(crate) amount: String,
    pub(crate) date: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MonthFilter {
    /// No MONTH clause: the current month
    Current,
    /// MONTH ALL
    All,
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Filters {
    pub(crate) month: MonthFilter,
    pub(crate) category: Option<String>,
    pub(crate) kind: Option<Kind>,
}

pub(crate) const HELP: &str = "\
ADD INCOME|EXPENSE <amount> [ON yyyy-mm-dd] [CATEGORY '<text>'] [NOTE '<text>'];
BUDGET [yyyy-mm] [<limit>];
SUMMARY [yyyy-mm];
LIST [MONTH <prefix>|ALL] [CATEGORY '<text>'] [TYPE income|expense];
EXPORT [MONTH <prefix>|ALL] [CATEGORY '<text>'] [TYPE income|expense] TO <file>;
BREAKDOWN [yyyy-mm];
CATEGORIES;
HELP;";

pub(crate) fn parse(query: &str) -> anyhow::Result<Statement> {
    let query = query.trim().trim_end_matches(';').trim_end();
    let result = all_consuming(alt((
        add::parse_add,
        budget::parse_budget,
        list::parse_list,
        list::parse_export,
        report::parse_summary,
        report::parse_breakdown,
        value(Statement::Categories, tag_no_case("CATEGORIES")),
        value(Statement::Help, tag_no_case("HELP")),
    )))(query);

    match result {
        Ok((_, statement)) => Ok(statement),
        Err(e) => Err(anyhow!("Unable to parse '{query}': {e}. Type HELP; for the syntax")),
    }
}

/// Run of non-whitespace characters, at least one
pub(crate) fn non_space(input: &str) -> IResult<&str, &str> {
    input.split_at_position1_complete(char::is_whitespace, ErrorKind::Space)
}

/// 'quoted', "quoted" or a bare word. Quoted text may be empty.
pub(crate) fn text_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        non_space,
    ))(input)
}

/// ` KEYWORD value`, with the leading whitespace
pub(crate) fn clause<'a>(keyword: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(tuple((multispace1, tag_no_case(keyword), multispace1)), text_value)
}

/// INCOME or EXPENSE
pub(crate) fn kind(input: &str) -> IResult<&str, Kind> {
    alt((
        value(Kind::Income, tag_no_case("INCOME")),
        value(Kind::Expense, tag_no_case("EXPENSE")),
    ))(input)
}
