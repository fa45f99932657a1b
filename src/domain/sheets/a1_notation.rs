use std::fmt::Formatter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl A1Notation {
    /// Range covering every cell of a worksheet, e.g. `'Sheet 1'`.
    pub fn whole_sheet(sheet_title: &str) -> Self {
        A1Notation(quote_sheet_title(sheet_title))
    }

    /// Range starting at the top-left cell of a worksheet, e.g. `'Sheet 1'!A1`.
    pub fn sheet_origin(sheet_title: &str) -> Self {
        A1Notation(format!("{}!A1", quote_sheet_title(sheet_title)))
    }
}

fn quote_sheet_title(sheet_title: &str) -> String {
    format!("'{}'", sheet_title.replace('\'', "''"))
}

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
