pub trait SplitFirstChar {
    fn split_first(&self) -> Option<(char, &Self)>;
}

impl SplitFirstChar for str {
    fn split_first(&self) -> Option<(char, &Self)> {
        let mut chars = self.chars();
        let c = chars.next()?;
        Some((c, chars.as_str()))
    }
}

/// Returns true if `s` starts with an uppercase ASCII letter.
pub(crate) fn starts_uppercase(s: &str) -> bool {
    matches!(s.split_first(), Some((c, _)) if c.is_ascii_uppercase())
}
