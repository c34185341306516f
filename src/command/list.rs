use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::combinator::opt;
use nom::sequence::{preceded, tuple};
use nom::IResult;
use crate::command::{clause, kind, Filters, MonthFilter, Statement};

/// Parse `LIST [filters]`
pub(crate) fn parse_list(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("LIST")(input)?;
    let (input, filters) = filters(input)?;
    Ok((input, Statement::List(filters)))
}

/// Parse `EXPORT [filters] TO file_path`
pub(crate) fn parse_export(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("EXPORT")(input)?;
    let (input, filters) = filters(input)?;
    let (input, file_path) = clause("TO")(input)?;
    Ok((input, Statement::Export(filters, file_path.to_string())))
}

fn filters(input: &str) -> IResult<&str, Filters> {
    let (input, month) = opt(clause("MONTH"))(input)?;
    let (input, category) = opt(clause("CATEGORY"))(input)?;
    let (input, kind) = opt(preceded(tuple((multispace1, tag_no_case("TYPE"), multispace1)), kind))(input)?;

    let month = match month {
        None => MonthFilter::Current,
        Some(m) if m.eq_ignore_ascii_case("ALL") => MonthFilter::All,
        Some(m) => MonthFilter::Prefix(m.to_string()),
    };

    Ok((input, Filters { month, category: category.map(str::to_string), kind }))
}

#[cfg(test)]
mod tests {
    use crate::command::{parse, Filters, MonthFilter, Statement};
    use crate::record::Kind;

    #[test]
    fn test_list() {
        assert_eq!(parse("LIST").unwrap(), Statement::List(Filters { month: MonthFilter::Current, category: None, kind: None }));
        assert_eq!(parse("list month all").unwrap(), Statement::List(Filters { month: MonthFilter::All, category: None, kind: None }));
        assert_eq!(
            parse("LIST MONTH 2025 CATEGORY 'Telephone/Mobile Bills' TYPE expense;").unwrap(),
            Statement::List(Filters {
                month: MonthFilter::Prefix("2025".to_string()),
                category: Some("Telephone/Mobile Bills".to_string()),
                kind: Some(Kind::Expense),
            })
        );
        assert!(parse("LIST TYPE budget").is_err());
    }

    #[test]
    fn test_export() {
        assert_eq!(
            parse("EXPORT TO './finance/export.csv'").unwrap(),
            Statement::Export(Filters { month: MonthFilter::Current, category: None, kind: None }, "./finance/export.csv".to_string())
        );
        assert_eq!(
            parse("EXPORT MONTH ALL TYPE income TO out.csv").unwrap(),
            Statement::Export(Filters { month: MonthFilter::All, category: None, kind: Some(Kind::Income) }, "out.csv".to_string())
        );
        assert!(parse("EXPORT MONTH 2025-08").is_err());
    }
}
