//! Token-level grammar of DCM lines.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, digit1, multispace0, space0, space1},
    combinator::{map, map_res, opt},
    multi::many0,
    sequence::{delimited, preceded},
};

use crate::model::FormatVersion;

/// Parameters of a block's opening line: `<name> [<x> [[@] <y>]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader<'a> {
    pub name: &'a str,
    pub x: Option<usize>,
    pub y: Option<usize>,
    /// Text after the last dimension the kind uses.
    pub trailing: &'a str,
}

/// Splits a line into its leading keyword and the trimmed rest.
pub fn split_keyword(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(pos) => (&line[..pos], line[pos..].trim()),
        None => (line, ""),
    }
}

/// Value of a string field such as `LANGNAME "text"`; quotes are optional.
pub fn string_field(rest: &str) -> String {
    rest.trim()
        .trim_matches(|c: char| c == ' ' || c == '"')
        .to_string()
}

/// A `"quoted string"`, without the quotes.
fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c: char| c == '"'), char('"')).parse(input)
}

/// A run of non-whitespace characters.
fn bare(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace()).parse(input)
}

/// Whitespace-separated tokens where quoted strings may contain spaces.
pub fn text_tokens(input: &str) -> Vec<&str> {
    let token = preceded(multispace0, alt((quoted, bare)));
    match many0(token).parse(input) {
        Ok((_, tokens)) => tokens,
        Err(_) => Vec::new(),
    }
}

fn dimension(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>()).parse(input)
}

fn block_header_parser(input: &str, dimensions: usize) -> IResult<&str, BlockHeader<'_>> {
    let (input, name) = preceded(space0, bare).parse(input)?;
    let (input, x) = if dimensions >= 1 {
        opt(preceded(space1, dimension)).parse(input)?
    } else {
        (input, None)
    };
    let (input, y) = if dimensions >= 2 && x.is_some() {
        opt(preceded((space1, opt((char('@'), space0))), dimension)).parse(input)?
    } else {
        (input, None)
    };
    let header = BlockHeader {
        name,
        x,
        y,
        trailing: input.trim(),
    };
    Ok((input, header))
}

/// Parses the rest of a block opening line, reading at most `dimensions`
/// dimensions after the name.
///
/// Returns `None` when the name is missing. Anything after the dimensions is
/// left in [`BlockHeader::trailing`].
pub fn block_header(rest: &str, dimensions: usize) -> Option<BlockHeader<'_>> {
    block_header_parser(rest, dimensions)
        .ok()
        .map(|(_, header)| header)
}

fn version_number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>()).parse(input)
}

/// Parses `<major>.<minor>` from the rest of a `KONSERVIERUNG_FORMAT` line.
pub fn format_version(rest: &str) -> Option<FormatVersion> {
    let mut parser = map(
        (preceded(space0, version_number), char('.'), version_number),
        |(major, _, minor)| FormatVersion { major, minor },
    );
    match parser.parse(rest) {
        Ok((remaining, version)) if remaining.trim().is_empty() => Some(version),
        _ => None,
    }
}

/// Splits `name=value` of a `VAR` line.
pub fn variant(rest: &str) -> Option<(&str, &str)> {
    let (name, value) = rest.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keyword() {
        assert_eq!(split_keyword("WERT 1 2  3"), ("WERT", "1 2  3"));
        assert_eq!(split_keyword("END"), ("END", ""));
        assert_eq!(split_keyword("ST/X\t0.5"), ("ST/X", "0.5"));
    }

    #[test]
    fn test_string_field() {
        assert_eq!(string_field("\"Sample value\""), "Sample value");
        assert_eq!(string_field("BareName"), "BareName");
        assert_eq!(string_field("  \"°C\" "), "°C");
    }

    #[test]
    fn test_text_tokens() {
        assert_eq!(text_tokens("\"a b\" c \"\""), vec!["a b", "c", ""]);
        assert_eq!(text_tokens("  "), Vec::<&str>::new());
        assert_eq!(text_tokens("Fn \"1.0\" \"Some text\""), vec!["Fn", "1.0", "Some text"]);
    }

    #[test]
    fn test_block_header_forms() {
        let header = |name, x, y, trailing| BlockHeader { name, x, y, trailing };
        assert_eq!(block_header("name", 0), Some(header("name", None, None, "")));
        assert_eq!(block_header("blk 4", 2), Some(header("blk", Some(4), None, "")));
        assert_eq!(block_header("blk 4 @ 2", 2), Some(header("blk", Some(4), Some(2), "")));
        assert_eq!(block_header("map 2   3", 2), Some(header("map", Some(2), Some(3), "")));
        assert_eq!(block_header("", 2), None);
        assert_eq!(block_header("blk x", 2), Some(header("blk", None, None, "x")));
    }

    #[test]
    fn test_block_header_trailing_text() {
        let line = block_header("l 2 3", 1).unwrap();
        assert_eq!((line.x, line.y, line.trailing), (Some(2), None, "3"));

        let parameter = block_header("p 3", 0).unwrap();
        assert_eq!((parameter.x, parameter.trailing), (None, "3"));

        let map = block_header("m 2 3 extra words", 2).unwrap();
        assert_eq!((map.x, map.y, map.trailing), (Some(2), Some(3), "extra words"));
    }

    #[test]
    fn test_format_version() {
        assert_eq!(format_version("2.0"), Some(FormatVersion { major: 2, minor: 0 }));
        assert_eq!(format_version(" 1.12 "), Some(FormatVersion { major: 1, minor: 12 }));
        assert_eq!(format_version("two"), None);
        assert_eq!(format_version("2"), None);
    }

    #[test]
    fn test_variant() {
        assert_eq!(variant("VariantA=27.5"), Some(("VariantA", "27.5")));
        assert_eq!(variant("A = \"x=y\""), Some(("A", "\"x=y\"")));
        assert_eq!(variant("no_equals"), None);
        assert_eq!(variant("=5"), None);
    }
}
