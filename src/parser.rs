use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{map, map_res, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use crate::model::{ScriptShape, INSERTS_DELIMITER, SEARCH_DELIMITER};

/// One line of a workload script.
#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Pragma { journal_mode: String },
    /// `dim` is `None` for the plain TEXT payload column.
    CreateTable { table: String, column: String, dim: Option<usize> },
    CreateIndex { name: String, table: String, column: String },
    Insert { table: String, id: u64, vector: Vec<f64>, typed: bool },
    Lookup { table: String, id: u64 },
    NearestNeighbor { index: String, probe: Vec<f64>, k: usize },
    InsertsDelimiter,
    SearchDelimiter,
}

impl Statement {
    /// The vector literal carried by the statement, if any.
    pub fn vector(&self) -> Option<&[f64]> {
        match self {
            Statement::Insert { vector, .. } => Some(vector),
            Statement::NearestNeighbor { probe, .. } => Some(probe),
            _ => None,
        }
    }

    fn is_setup(&self) -> bool {
        matches!(
            self,
            Statement::Pragma { .. } | Statement::CreateTable { .. } | Statement::CreateIndex { .. }
        )
    }
}

// --- BASIC PARSERS ---

fn parse_float(input: &str) -> IResult<&str, f64> {
    let (input, num_str) = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(tuple((char('.'), digit1))),
    )))(input)?;
    match num_str.parse::<f64>() {
        Ok(n) => Ok((input, n)),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Float))),
    }
}

fn parse_u64(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |s: &str| s.parse::<u64>())(input)
}

fn parse_usize(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

fn parse_vector(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(
        char('['),
        separated_list0(tuple((multispace0, char(','), multispace0)), parse_float),
        char(']'),
    )(input)
}

fn parse_quoted_vector(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(char('\''), parse_vector, char('\''))(input)
}

fn parse_identifier(input: &str) -> IResult<&str, String> {
    map(take_while1(|c: char| c.is_alphanumeric() || c == '_'), String::from)(input)
}

fn parse_quoted_identifier(input: &str) -> IResult<&str, String> {
    delimited(char('\''), parse_identifier, char('\''))(input)
}

// --- HELPERS ---
fn ws<'a, F, O, E: nom::error::ParseError<&'a str>>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where F: FnMut(&'a str) -> IResult<&'a str, O, E> {
    delimited(multispace0, inner, multispace0)
}

fn tag_ci(t: &'static str) -> impl FnMut(&str) -> IResult<&str, &str> {
    move |input| tag_no_case(t)(input)
}

fn semicolon(input: &str) -> IResult<&str, char> {
    ws(char(';'))(input)
}

// --- STATEMENT PARSERS ---

fn parse_pragma(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_ci("PRAGMA")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag_ci("journal_mode")(input)?;
    let (input, _) = ws(char('='))(input)?;
    let (input, journal_mode) = parse_identifier(input)?;
    let (input, _) = semicolon(input)?;
    Ok((input, Statement::Pragma { journal_mode }))
}

fn parse_create_table(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_ci("CREATE")(input)?;
    let (input, _) = ws(tag_ci("TABLE"))(input)?;
    let (input, table) = parse_identifier(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, _) = tag_ci("id")(input)?;
    let (input, _) = ws(tag_ci("INTEGER"))(input)?;
    let (input, _) = tag_ci("PRIMARY")(input)?;
    let (input, _) = ws(tag_ci("KEY"))(input)?;
    let (input, _) = ws(char(','))(input)?;
    let (input, column) = parse_identifier(input)?;
    let (input, _) = multispace1(input)?;

    let (input, dim) = alt((
        map(tag_ci("TEXT"), |_| None),
        map(
            preceded(tag_ci("FLOAT32"), delimited(ws(char('(')), parse_usize, ws(char(')')))),
            Some,
        ),
    ))(input)?;

    let (input, _) = ws(char(')'))(input)?;
    let (input, _) = semicolon(input)?;
    Ok((input, Statement::CreateTable { table, column, dim }))
}

fn parse_create_index(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_ci("CREATE")(input)?;
    let (input, _) = ws(tag_ci("INDEX"))(input)?;
    let (input, name) = parse_identifier(input)?;
    let (input, _) = ws(tag_ci("ON"))(input)?;
    let (input, table) = parse_identifier(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, _) = tag_ci("libsql_vector_idx")(input)?;
    let (input, column) = delimited(ws(char('(')), parse_identifier, ws(char(')')))(input)?;
    let (input, _) = ws(char(')'))(input)?;
    let (input, _) = semicolon(input)?;
    Ok((input, Statement::CreateIndex { name, table, column }))
}

fn parse_insert(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_ci("INSERT")(input)?;
    let (input, _) = ws(tag_ci("INTO"))(input)?;
    let (input, table) = parse_identifier(input)?;
    let (input, _) = ws(tag_ci("VALUES"))(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, id) = parse_u64(input)?;
    let (input, _) = ws(char(','))(input)?;

    let (input, (vector, typed)) = alt((
        map(
            preceded(tag_ci("vector"), delimited(ws(char('(')), parse_quoted_vector, ws(char(')')))),
            |v| (v, true),
        ),
        map(parse_quoted_vector, |v| (v, false)),
    ))(input)?;

    let (input, _) = ws(char(')'))(input)?;
    let (input, _) = semicolon(input)?;
    Ok((input, Statement::Insert { table, id, vector, typed }))
}

fn parse_lookup(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_ci("id")(input)?;
    let (input, _) = ws(char(','))(input)?;
    let (input, _) = tag_ci("value")(input)?;
    let (input, _) = ws(tag_ci("FROM"))(input)?;
    let (input, table) = parse_identifier(input)?;
    let (input, _) = ws(tag_ci("WHERE"))(input)?;
    let (input, _) = tag_ci("id")(input)?;
    let (input, _) = ws(char('='))(input)?;
    let (input, id) = parse_u64(input)?;
    let (input, _) = semicolon(input)?;
    Ok((input, Statement::Lookup { table, id }))
}

fn parse_top_k(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_ci("id")(input)?;
    let (input, _) = ws(tag_ci("FROM"))(input)?;
    let (input, _) = tag_ci("vector_top_k")(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, index) = parse_quoted_identifier(input)?;
    let (input, _) = ws(char(','))(input)?;
    let (input, probe) = parse_quoted_vector(input)?;
    let (input, _) = ws(char(','))(input)?;
    let (input, k) = parse_usize(input)?;
    let (input, _) = ws(char(')'))(input)?;
    let (input, _) = semicolon(input)?;
    Ok((input, Statement::NearestNeighbor { index, probe, k }))
}

fn parse_select(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_ci("SELECT")(input)?;
    let (input, _) = multispace1(input)?;
    alt((parse_lookup, parse_top_k))(input)
}

fn parse_delimiter(input: &str) -> IResult<&str, Statement> {
    alt((
        map(tag(INSERTS_DELIMITER), |_| Statement::InsertsDelimiter),
        map(tag(SEARCH_DELIMITER), |_| Statement::SearchDelimiter),
    ))(input)
}

pub fn parse_statement(input: &str) -> Result<Statement, String> {
    let input = input.trim();
    let result = alt((
        parse_delimiter,
        parse_pragma,
        parse_create_table,
        parse_create_index,
        parse_insert,
        parse_select,
    ))(input);

    match result {
        Ok((remainder, stmt)) => {
            if !remainder.trim().is_empty() {
                return Err(format!("Unexpected tokens at end: '{}'", remainder));
            }
            Ok(stmt)
        },
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let context: String = if e.input.chars().count() > 20 {
                format!("{}...", e.input.chars().take(20).collect::<String>())
            } else {
                e.input.to_string()
            };
            Err(format!("Invalid syntax near: '{}'", context))
        },
        Err(nom::Err::Incomplete(_)) => Err("Incomplete statement.".to_string()),
    }
}

// --- PHASES ---

/// A script split at its delimiters, the way the benchmark harness reads it.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Phases {
    /// Leading pragma / schema statements.
    pub setup: Vec<Statement>,
    /// Everything after setup up to `---inserts`.
    pub inserts: Vec<Statement>,
    /// Everything between `---inserts` and `---search`.
    pub search: Vec<Statement>,
}

impl Phases {
    pub fn shape(&self) -> ScriptShape {
        let mut shape = ScriptShape { delimiters: 2, ..Default::default() };
        for stmt in self.setup.iter().chain(&self.inserts).chain(&self.search) {
            match stmt {
                Statement::Pragma { .. } => shape.pragmas += 1,
                Statement::CreateTable { .. } => shape.tables += 1,
                Statement::CreateIndex { .. } => shape.indexes += 1,
                Statement::Insert { .. } => shape.inserts += 1,
                Statement::Lookup { .. } => shape.lookups += 1,
                Statement::NearestNeighbor { .. } => shape.nearest += 1,
                Statement::InsertsDelimiter | Statement::SearchDelimiter => shape.delimiters += 1,
            }
        }
        shape
    }

    /// Every vector literal in the script, inserts first.
    pub fn vectors(&self) -> impl Iterator<Item = &[f64]> {
        self.inserts.iter().chain(&self.search).filter_map(Statement::vector)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Setup,
    Inserts,
    Search,
    Done,
}

/// Parse a whole script and split it into phases.
/// A missing, repeated or out-of-order delimiter is an error: that is what a
/// truncated run looks like.
pub fn split_phases(script: &str) -> Result<Phases, String> {
    let mut phases = Phases::default();
    let mut section = Section::Setup;

    for (lineno, line) in script.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let stmt = parse_statement(line).map_err(|e| format!("line {}: {}", lineno + 1, e))?;

        let next = match (section, &stmt) {
            (Section::Setup | Section::Inserts, Statement::InsertsDelimiter) => Section::Search,
            (Section::Search, Statement::SearchDelimiter) => Section::Done,
            (Section::Done, _) => {
                return Err(format!("line {}: statement after '{}'", lineno + 1, SEARCH_DELIMITER));
            }
            (_, Statement::InsertsDelimiter | Statement::SearchDelimiter) => {
                return Err(format!("line {}: unexpected delimiter '{}'", lineno + 1, line.trim()));
            }
            (Section::Setup, s) if s.is_setup() => Section::Setup,
            (Section::Setup | Section::Inserts, _) => Section::Inserts,
            (Section::Search, _) => Section::Search,
        };

        if next == section {
            match next {
                Section::Setup => phases.setup.push(stmt),
                Section::Inserts => phases.inserts.push(stmt),
                Section::Search => phases.search.push(stmt),
                Section::Done => {}
            }
        } else if next == Section::Inserts {
            phases.inserts.push(stmt);
        }
        section = next;
    }

    match section {
        Section::Done => Ok(phases),
        Section::Search => Err(format!("Missing '{}' delimiter", SEARCH_DELIMITER)),
        Section::Setup | Section::Inserts => Err(format!("Missing '{}' delimiter", INSERTS_DELIMITER)),
    }
}
