use smallvec::SmallVec;

/// How a listing line encodes its production.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineForm {
    /// `TAG SEP CHILD...`
    Plain,
    /// `NUM NUM TAG SEP CHILD...`, carrying Dirichlet prior hyperparameters.
    Dirichlet,
}

impl LineForm {
    /// Index of the tag token.
    fn tag_index(self) -> usize {
        match self {
            LineForm::Plain => 0,
            LineForm::Dirichlet => 2,
        }
    }

    fn min_tokens(self) -> usize {
        // tag, separator, and at least one child
        self.tag_index() + 3
    }
}

/// A listing line split into its tag and raw child tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProduction<'a> {
    pub form: LineForm,
    pub tag: &'a str,
    pub children: SmallVec<[&'a str; 6]>,
}

/// Returns true if `token` consists only of the characters `[0-9.eE+-]`.
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| matches!(c, '0'..='9' | '.' | 'e' | 'E' | '+' | '-'))
}

/// Splits a listing line into its tag and children. Leading and trailing whitespace is
/// ignored. The separator token following the tag, and in the Dirichlet form the two
/// hyperparameters, are discarded.
pub fn parse_line(line: &str) -> Result<ParsedProduction<'_>, &'static str> {
    let tokens: SmallVec<[&str; 8]> = line.split_whitespace().collect();

    let form = match tokens.first() {
        Some(first) if is_numeric(first) => LineForm::Dirichlet,
        _ => LineForm::Plain,
    };

    if form == LineForm::Dirichlet && !tokens.get(1).map_or(false, |t| is_numeric(t)) {
        return Err("second Dirichlet prior parameter is not numeric");
    }

    if tokens.len() < form.min_tokens() {
        return Err("wrong number of tokens");
    }

    let tag_index = form.tag_index();
    Ok(ParsedProduction {
        form,
        tag: tokens[tag_index],
        children: tokens[tag_index + 2..].iter().copied().collect(),
    })
}
