use std::{borrow::Cow, fmt::Write};

const COLUMN_SEPARATOR: &str = " | ";
const RULE_SEPARATOR: &str = "-+-";

/// Monospace table for terminals and plain-text sharing.
#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.as_ref().iter().take(col_count).enumerate() {
                col_widths[i] = col_widths[i].max(display_width(cell));
            }
        }

        let mut table = String::new();
        self.write_line(&mut table, self.headers, &col_widths);

        let rule: Vec<String> = col_widths.iter().map(|width| "-".repeat(*width)).collect();
        let _ = writeln!(&mut table, "{}", rule.join(RULE_SEPARATOR));

        for row in &self.rows {
            self.write_line(&mut table, row.as_ref(), &col_widths);
        }

        table
    }

    fn write_line(&self, out: &mut String, cells: &[Cow<'a, str>], col_widths: &[usize]) {
        let mut line = String::new();
        for (i, width) in col_widths.iter().enumerate() {
            if i > 0 {
                line.push_str(COLUMN_SEPARATOR);
            }
            let cell = cells.get(i).map(|c| c.as_ref()).unwrap_or_default();
            let alignment = self.alignments.get(i).copied().unwrap_or_default();
            line.push_str(&pad(cell, *width, alignment));
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

// CJK and other wide scripts take two terminal cells.
fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| if u32::from(c) < 0x2E80 { 1 } else { 2 })
        .sum()
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let fill = width.saturating_sub(display_width(text));
    let (left, right) = match alignment {
        Alignment::Left => (0, fill),
        Alignment::Center => (fill / 2, fill - fill / 2),
        Alignment::Right => (fill, 0),
    };
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_simple_table() {
        let table = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&[Cow::Borrowed("Name"), Cow::Borrowed("Balance")])
            .row([Cow::Borrowed("Alice"), Cow::Borrowed("+100")])
            .row([Cow::Borrowed("Bob"), Cow::Borrowed("-100")])
            .build();

        assert_eq!(
            table,
            "Name  | Balance\n\
             ------+--------\n\
             Alice |    +100\n\
             Bob   |    -100\n"
        );
    }

    #[rstest]
    fn short_rows_are_padded() {
        let table = TextTableBuilder::new()
            .headers(&[Cow::Borrowed("A"), Cow::Borrowed("B")])
            .row(vec![Cow::Borrowed("x")])
            .build();

        assert_eq!(table, "A | B\n--+--\nx |\n");
    }

    #[rstest]
    fn no_headers_no_table() {
        let table: String = TextTableBuilder::<Vec<Cow<str>>>::new().build();
        assert!(table.is_empty());
    }

    #[rstest]
    #[case::left("ab", Alignment::Left, "ab   ")]
    #[case::center("ab", Alignment::Center, " ab  ")]
    #[case::right("ab", Alignment::Right, "   ab")]
    #[case::wide_text("寿司", Alignment::Right, " 寿司")]
    fn padding(#[case] text: &str, #[case] alignment: Alignment, #[case] expected: &str) {
        assert_eq!(pad(text, 5, alignment), expected);
    }
}
