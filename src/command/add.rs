use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::combinator::opt;
use nom::IResult;
use crate::command::{clause, kind, non_space, AddArgs, Statement};

/// Parse `ADD INCOME|EXPENSE amount [ON date] [CATEGORY 'x'] [NOTE 'y']`
pub(crate) fn parse_add(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("ADD")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, kind) = kind(input)?;
    let (input, _) = multispace1(input)?;
    let (input, amount) = non_space(input)?;
    let (input, date) = opt(clause("ON"))(input)?;
    let (input, category) = opt(clause("CATEGORY"))(input)?;
    let (input, note) = opt(clause("NOTE"))(input)?;

    Ok((input, Statement::Add(AddArgs {
        kind,
        amount: amount.to_string(),
        date: date.map(str::to_string),
        category: category.map(str::to_string),
        note: note.map(str::to_string),
    })))
}
