//! Parse the textual clause notation `head :- body.` into a raw,
//! uninterned form. Names are kept as strings here; classifying them
//! as constants or variables and producing canonical symbols is the
//! interning context's job.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0, one_of},
    combinator::{map, map_res, opt, recognize},
    multi::{many0, many0_count, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::Float;

/// An argument as written: a bare name (constant or variable, to be
/// classified later), a numeric literal, or a compound.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParsedTerm {
    Name(String),
    Int(i64),
    Float(Float),
    Structure(String, Vec<ParsedTerm>),
    List(Vec<ParsedTerm>),
    Pair(Box<ParsedTerm>, Box<ParsedTerm>),
}

/// A predicate application as written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedAtom {
    pub predicate: String,
    pub arguments: Vec<ParsedTerm>,
}

/// An atom or its negation as written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParsedLiteral {
    Atom(ParsedAtom),
    Not(ParsedAtom),
}

/// A clause as written; a fact has an empty body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedClause {
    pub head: ParsedAtom,
    pub body: Vec<ParsedLiteral>,
}

fn ws<'a, O>(
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, parser, multispace0)
}

fn bare_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn quoted_name(input: &str) -> IResult<&str, &str> {
    recognize(tuple((char('\''), is_not("'"), char('\''))))(input)
}

fn name(input: &str) -> IResult<&str, String> {
    map(alt((quoted_name, bare_name)), String::from)(input)
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse)(input)
}

fn float(input: &str) -> IResult<&str, Float> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            char('.'),
            digit1,
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| s.parse::<f64>().map(Float::new),
    )(input)
}

fn arguments(input: &str) -> IResult<&str, Vec<ParsedTerm>> {
    delimited(
        char('('),
        separated_list1(char(','), ws(term)),
        char(')'),
    )(input)
}

fn structure(input: &str) -> IResult<&str, ParsedTerm> {
    map(pair(name, arguments), |(functor, args)| {
        ParsedTerm::Structure(functor, args)
    })(input)
}

fn list(input: &str) -> IResult<&str, ParsedTerm> {
    map(
        delimited(
            char('['),
            separated_list0(char(','), ws(term)),
            char(']'),
        ),
        ParsedTerm::List,
    )(input)
}

fn head_tail(input: &str) -> IResult<&str, ParsedTerm> {
    map(
        delimited(
            char('['),
            separated_pair(ws(term), char('|'), ws(term)),
            char(']'),
        ),
        |(head, tail)| ParsedTerm::Pair(Box::new(head), Box::new(tail)),
    )(input)
}

pub fn term(input: &str) -> IResult<&str, ParsedTerm> {
    alt((
        map(float, ParsedTerm::Float),
        map(integer, ParsedTerm::Int),
        head_tail,
        list,
        structure,
        map(name, ParsedTerm::Name),
    ))(input)
}

pub fn atom(input: &str) -> IResult<&str, ParsedAtom> {
    map(pair(name, opt(arguments)), |(predicate, args)| ParsedAtom {
        predicate,
        arguments: args.unwrap_or_default(),
    })(input)
}

pub fn literal(input: &str) -> IResult<&str, ParsedLiteral> {
    alt((
        map(preceded(pair(tag("\\+"), multispace0), atom), ParsedLiteral::Not),
        map(atom, ParsedLiteral::Atom),
    ))(input)
}

pub fn clause(input: &str) -> IResult<&str, ParsedClause> {
    map(
        pair(
            ws(atom),
            opt(preceded(
                tag(":-"),
                separated_list1(char(','), ws(literal)),
            )),
        ),
        |(head, body)| ParsedClause {
            head,
            body: body.unwrap_or_default(),
        },
    )(input)
}

/// A sequence of `.`-terminated clauses.
pub fn program(input: &str) -> IResult<&str, Vec<ParsedClause>> {
    terminated(many0(terminated(clause, char('.'))), multispace0)(input)
}
