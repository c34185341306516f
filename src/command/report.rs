use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::combinator::opt;
use nom::sequence::preceded;
use nom::IResult;
use crate::command::{non_space, Statement};

/// Parse `SUMMARY [month]`
pub(crate) fn parse_summary(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("SUMMARY")(input)?;
    let (input, month) = optional_month(input)?;
    Ok((input, Statement::Summary(month)))
}

/// Parse `BREAKDOWN [month]`
pub(crate) fn parse_breakdown(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("BREAKDOWN")(input)?;
    let (input, month) = optional_month(input)?;
    Ok((input, Statement::Breakdown(month)))
}

fn optional_month(input: &str) -> IResult<&str, Option<String>> {
    let (input, month) = opt(preceded(multispace1, non_space))(input)?;
    Ok((input, month.map(str::to_string)))
}
