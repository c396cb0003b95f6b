//! Locates fenced regions in assistant text.

/// Opening and closing fence delimiter
pub const FENCE: &str = "```";

/// A complete fenced region, as slices of the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFence<'a> {
    /// Text after the opening marker up to the end of its line
    pub info: &'a str,
    /// Text between the opening line and the closing marker, untrimmed
    pub body: &'a str,
    /// Byte offset of the opening marker
    pub start: usize,
    /// Byte offset just past the closing marker
    pub end: usize,
}

/// Iterator over the complete fences of a text.
///
/// The closing marker is the first `FENCE` after the opening line, so a
/// fence nested inside a body ends the outer block early. An opening marker
/// with no line break or no closing marker after it ends the scan.
#[derive(Debug, Clone)]
pub struct FenceLexer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> FenceLexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for FenceLexer<'a> {
    type Item = RawFence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let start = self.pos + rest.find(FENCE)?;
        let info_start = start + FENCE.len();

        let Some(newline) = self.text[info_start..].find('\n') else {
            log::warn!("Fence at byte {} has no body line; ignoring", start);
            self.pos = self.text.len();
            return None;
        };
        let info_end = info_start + newline;
        let info = &self.text[info_start..info_end];
        let info = info.strip_suffix('\r').unwrap_or(info);

        let body_start = info_end + 1;
        let Some(close) = self.text[body_start..].find(FENCE) else {
            log::warn!("Unterminated fence at byte {}; ignoring", start);
            self.pos = self.text.len();
            return None;
        };
        let body_end = body_start + close;
        let end = body_end + FENCE.len();

        self.pos = end;
        Some(RawFence {
            info,
            body: &self.text[body_start..body_end],
            start,
            end,
        })
    }
}
