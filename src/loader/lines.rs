//! Shared line discipline for all table files.
//!
//! Every table uses the same conventions: content from the first `#` onward
//! is a comment, lines are right-trimmed, lines that are blank after
//! trimming are skipped, and leading whitespace is preserved (the
//! fixed-width country format slices by character offset).

/// A substantive line together with the byte offset of its start within the
/// file, used to build error spans.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub text: &'a str,
    pub offset: usize,
}

pub struct Lines<'a> {
    src: &'a str,
    offset: usize,
}

/// Iterate over the substantive lines of a file.
pub fn lines(src: &str) -> Lines<'_> {
    Lines { src, offset: 0 }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        while self.offset < self.src.len() {
            let start = self.offset;
            let rest = &self.src[start..];
            let len = rest.find('\n').map_or(rest.len(), |i| i + 1);
            self.offset = start + len;

            let mut text = &rest[..len];
            if let Some(i) = text.find('#') {
                text = &text[..i];
            }
            let text = text.trim_end();
            if text.is_empty() {
                continue;
            }
            return Some(Line { text, offset: start });
        }
        None
    }
}

/// A whitespace-delimited token and its byte offset within the line.
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Split a line into tokens, keeping their positions for error spans.
pub fn tokens(text: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push(Token {
                    text: &text[s..i],
                    start: s,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(Token {
            text: &text[s..],
            start: s,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_blank_lines() {
        let src = "# header\nZone Europe/Paris\n\n   \nZone Asia/Tokyo # inline\n";
        let got: Vec<&str> = lines(src).map(|l| l.text).collect();
        assert_eq!(got, vec!["Zone Europe/Paris", "Zone Asia/Tokyo"]);
    }

    #[test]
    fn keeps_leading_whitespace() {
        let src = "  FR France\n";
        let got: Vec<&str> = lines(src).map(|l| l.text).collect();
        assert_eq!(got, vec!["  FR France"]);
    }

    #[test]
    fn line_offsets_point_into_source() {
        let src = "# c\nZone A\nZone B";
        let got: Vec<Line> = lines(src).collect();
        assert_eq!(got[0].offset, 4);
        assert_eq!(got[1].offset, 11);
        assert_eq!(&src[got[1].offset..], "Zone B");
    }

    #[test]
    fn line_blank_after_comment_strip_is_skipped() {
        let src = "   # only a comment\nZone A\n";
        let got: Vec<&str> = lines(src).map(|l| l.text).collect();
        assert_eq!(got, vec!["Zone A"]);
    }

    #[test]
    fn tokens_carry_offsets() {
        let toks = tokens("Link  Europe/Paris Europe/Jersey");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[0].text, "Link");
        assert_eq!(toks[1].text, "Europe/Paris");
        assert_eq!(toks[1].start, 6);
        assert_eq!(toks[2].start, 19);
    }
}
