use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit1, multispace1};
use nom::combinator::{opt, recognize};
use nom::sequence::{preceded, tuple};
use nom::IResult;
use crate::command::{non_space, Statement};

/// Parse `BUDGET [month] [limit]`
pub(crate) fn parse_budget(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("BUDGET")(input)?;
    let (input, month) = opt(preceded(multispace1, month_token))(input)?;
    let (input, limit) = opt(preceded(multispace1, non_space))(input)?;
    Ok((input, Statement::Budget(month.map(str::to_string), limit.map(str::to_string))))
}

/// Anything shaped like `digits-digits`. Range checks are left to validation.
fn month_token(input: &str) -> IResult<&str, &str> {
    recognize(tuple((digit1, char('-'), digit1)))(input)
}
