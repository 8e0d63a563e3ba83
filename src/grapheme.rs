//! Grapheme cluster boundaries and the grapheme iterator.

use crate::{codepoint::Codepoint, ucd::Tables, utf8, UnicodeData};
use std::{cmp, fmt, hash, iter::FusedIterator, ops::Range};

/// Running condition of a grapheme boundary scan.
///
/// The register is opaque: `0` means "start of scan", anything else is
/// owned by the [`UnicodeData`] implementation. A state belongs to exactly
/// one scan; start every scan with [`BreakState::new`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BreakState(i32);

impl BreakState {
    /// The state at the start of a scan.
    pub const fn new() -> Self {
        BreakState(0)
    }

    /// Rebuilds a state from its raw register value.
    pub const fn from_raw(raw: i32) -> Self {
        BreakState(raw)
    }

    /// The raw register value.
    pub const fn into_raw(self) -> i32 {
        self.0
    }

    /// Whether no codepoint pair has been scanned since the last reset.
    pub const fn is_start(self) -> bool {
        self.0 == 0
    }

    /// Forgets all context.
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Decides grapheme cluster boundaries on top of a [`UnicodeData`] service.
#[derive(Copy, Clone, Debug, Default)]
pub struct GraphemeBreaker<D = Tables> {
    data: D,
}

impl GraphemeBreaker<Tables> {
    /// A breaker using the built-in tables.
    pub const fn new() -> Self {
        GraphemeBreaker { data: Tables }
    }
}

impl<D: UnicodeData> GraphemeBreaker<D> {
    /// A breaker using the given Unicode data.
    pub const fn with_data(data: D) -> Self {
        GraphemeBreaker { data }
    }

    /// Whether there is a boundary between two adjacent codepoints, with
    /// no context from before `prev`. Don't use this to scan runs of
    /// three or more codepoints; see [`is_break_stateful`](Self::is_break_stateful).
    pub fn is_break(&self, prev: Codepoint, next: Codepoint) -> bool {
        self.is_break_stateful(&mut BreakState::new(), prev, next)
    }

    /// Whether there is a boundary between `prev` and `next`, advancing
    /// `state`. A malformed codepoint on either side is always a boundary
    /// and resets `state`, so a scan resynchronizes right after it.
    pub fn is_break_stateful(&self, state: &mut BreakState, prev: Codepoint, next: Codepoint) -> bool {
        match (prev.value(), next.value()) {
            (Some(prev), Some(next)) => self.data.grapheme_break_stateful(prev, next, state),
            _ => {
                state.reset();
                true
            }
        }
    }
}

/// Pairwise boundary test using the built-in tables.
pub fn is_grapheme_break(prev: impl Into<Codepoint>, next: impl Into<Codepoint>) -> bool {
    GraphemeBreaker::new().is_break(prev.into(), next.into())
}

/// Stateful boundary test using the built-in tables.
pub fn is_grapheme_break_stateful(
    state: &mut BreakState,
    prev: impl Into<Codepoint>,
    next: impl Into<Codepoint>,
) -> bool {
    GraphemeBreaker::new().is_break_stateful(state, prev.into(), next.into())
}

/// Text that can be split into grapheme clusters: `&str`, or raw bytes
/// that may hold invalid UTF-8.
pub trait TextSource<'a>: Copy {
    /// The encoded bytes of the text.
    fn as_bytes(self) -> &'a [u8];

    /// The sub-text at `range`, which always falls on codepoint boundaries.
    fn slice(self, range: Range<usize>) -> Self;
}

impl<'a> TextSource<'a> for &'a str {
    fn as_bytes(self) -> &'a [u8] {
        str::as_bytes(self)
    }

    fn slice(self, range: Range<usize>) -> Self {
        &self[range]
    }
}

impl<'a> TextSource<'a> for &'a [u8] {
    fn as_bytes(self) -> &'a [u8] {
        self
    }

    fn slice(self, range: Range<usize>) -> Self {
        &self[range]
    }
}

/// Where a grapheme traversal stands: the break state carried over from
/// the previous step and the byte offset of the next cluster.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GraphemePosition {
    /// Break state after the previous cluster.
    pub state: BreakState,
    /// Byte offset where the next cluster starts.
    pub offset: usize,
}

impl GraphemePosition {
    /// The beginning of the text.
    pub const fn start() -> Self {
        GraphemePosition {
            state: BreakState::new(),
            offset: 0,
        }
    }
}

/// The grapheme clusters of a text.
///
/// This is a plain view of the source text; each traversal carries its
/// own [`BreakState`]. Comparison and hashing look at the text only.
#[derive(Copy, Clone)]
pub struct Graphemes<S, D = Tables> {
    source: S,
    breaker: GraphemeBreaker<D>,
}

/// Returns the grapheme clusters of `text`.
pub fn graphemes<'a, S: TextSource<'a>>(text: S) -> Graphemes<S> {
    Graphemes {
        source: text,
        breaker: GraphemeBreaker::new(),
    }
}

impl<'a, S: TextSource<'a>, D: UnicodeData + Copy> Graphemes<S, D> {
    /// Grapheme clusters of `text` according to the given Unicode data.
    pub fn with_data(text: S, data: D) -> Self {
        Graphemes {
            source: text,
            breaker: GraphemeBreaker::with_data(data),
        }
    }

    /// The underlying text.
    pub fn source(&self) -> S {
        self.source
    }

    /// Number of clusters. This scans the whole text.
    pub fn count_clusters(&self) -> usize {
        let mut state = BreakState::new();
        let mut prev: Option<Codepoint> = None;
        let mut n = 0;
        for (_, cp) in utf8::codepoint_indices(self.source.as_bytes()) {
            let boundary = match prev {
                Some(prev) => self.breaker.is_break_stateful(&mut state, prev, cp),
                None => true,
            };
            n += boundary as usize;
            prev = Some(cp);
        }
        n
    }

    /// Whether the text has no clusters at all.
    pub fn is_empty(&self) -> bool {
        self.source.as_bytes().is_empty()
    }

    /// Scans one cluster starting at `pos`, returning it together with
    /// the position of the cluster after it, or `None` at end of text.
    ///
    /// `pos` must be [`GraphemePosition::start`] or a position returned by
    /// an earlier step over the same text.
    pub fn next_from(&self, pos: GraphemePosition) -> Option<(S, GraphemePosition)> {
        let bytes = self.source.as_bytes();
        let rest = bytes.get(pos.offset..)?;
        let mut codepoints = utf8::codepoint_indices(rest);
        let (_, mut prev) = codepoints.next()?;
        let mut state = pos.state;
        let mut end = rest.len();
        for (offset, cp) in codepoints {
            if self.breaker.is_break_stateful(&mut state, prev, cp) {
                end = offset;
                break;
            }
            prev = cp;
        }
        let end = pos.offset + end;
        let cluster = self.source.slice(pos.offset..end);
        Some((cluster, GraphemePosition { state, offset: end }))
    }

    /// Iterates over the clusters from the start of the text.
    pub fn iter(&self) -> GraphemeClusters<S, D> {
        GraphemeClusters {
            graphemes: *self,
            pos: GraphemePosition::start(),
        }
    }
}

impl<'a, S: TextSource<'a>, D: UnicodeData + Copy> IntoIterator for Graphemes<S, D> {
    type Item = S;
    type IntoIter = GraphemeClusters<S, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: PartialEq, D> PartialEq for Graphemes<S, D> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl<S: Eq, D> Eq for Graphemes<S, D> {}

impl<S: PartialOrd, D> PartialOrd for Graphemes<S, D> {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.source.partial_cmp(&other.source)
    }
}

impl<S: Ord, D> Ord for Graphemes<S, D> {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.source.cmp(&other.source)
    }
}

impl<S: hash::Hash, D> hash::Hash for Graphemes<S, D> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl<S: fmt::Debug, D> fmt::Debug for Graphemes<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graphemes({:?})", self.source)
    }
}

/// An iterator over the grapheme clusters of a text.
#[derive(Clone)]
pub struct GraphemeClusters<S, D = Tables> {
    graphemes: Graphemes<S, D>,
    pos: GraphemePosition,
}

impl<S, D> GraphemeClusters<S, D> {
    /// Position of the next cluster; feed it to [`Graphemes::next_from`]
    /// to resume elsewhere.
    pub fn position(&self) -> GraphemePosition {
        self.pos
    }
}

impl<'a, S: TextSource<'a>, D: UnicodeData + Copy> Iterator for GraphemeClusters<S, D> {
    type Item = S;

    fn next(&mut self) -> Option<Self::Item> {
        let (cluster, pos) = self.graphemes.next_from(self.pos)?;
        self.pos = pos;
        Some(cluster)
    }
}

impl<'a, S: TextSource<'a>, D: UnicodeData + Copy> FusedIterator for GraphemeClusters<S, D> {}

impl<S: fmt::Debug, D> fmt::Debug for GraphemeClusters<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphemeClusters")
            .field("source", &self.graphemes.source)
            .field("pos", &self.pos)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairwise() {
        assert!(is_grapheme_break('a', 'b'));
        assert!(!is_grapheme_break('a', '\u{0308}'));
        assert!(!is_grapheme_break('\r', '\n'));
        assert!(is_grapheme_break(Codepoint::malformed(&[0x80]), '\u{0308}'));
    }

    #[test]
    fn test_malformed_resets_state() {
        let ri = '\u{1F1E6}';
        let mut state = BreakState::new();
        assert!(!is_grapheme_break_stateful(&mut state, ri, ri));
        assert!(!state.is_start());
        let bad = Codepoint::malformed(&[0xFF]);
        assert!(is_grapheme_break_stateful(&mut state, ri, bad));
        assert!(state.is_start());
        assert!(is_grapheme_break_stateful(&mut state, bad, ri));
    }

    #[test]
    fn test_clusters() {
        let text = "e\u{0301}le\u{0300}ve\r\n\u{1F1FA}\u{1F1F8}\u{1F1EB}";
        let clusters: Vec<&str> = graphemes(text).into_iter().collect();
        assert_eq!(
            vec![
                "e\u{0301}",
                "l",
                "e\u{0300}",
                "v",
                "e",
                "\r\n",
                "\u{1F1FA}\u{1F1F8}",
                "\u{1F1EB}"
            ],
            clusters
        );
        assert_eq!(8, graphemes(text).count_clusters());
    }

    #[test]
    fn test_empty() {
        assert!(graphemes("").is_empty());
        assert_eq!(0, graphemes("").count_clusters());
        assert_eq!(None, graphemes("").iter().next());
    }

    #[test]
    fn test_bytes_with_malformed() {
        let text: &[u8] = &[b'a', 0xCC, 0x88, 0x80, 0xCC, 0x88, b'b'];
        let clusters: Vec<&[u8]> = graphemes(text).into_iter().collect();
        assert_eq!(
            vec![&[b'a', 0xCC, 0x88][..], &[0x80][..], &[0xCC, 0x88][..], &[b'b'][..]],
            clusters
        );
        assert_eq!(4, graphemes(text).count_clusters());
    }

    #[test]
    fn test_resume() {
        let text = "\u{1F1E6}\u{1F1E7}\u{1F1E8}\u{1F1E9}x";
        let g = graphemes(text);
        let mut iter = g.iter();
        assert_eq!(Some("\u{1F1E6}\u{1F1E7}"), iter.next());
        let pos = iter.position();
        let (cluster, pos) = g.next_from(pos).unwrap();
        assert_eq!("\u{1F1E8}\u{1F1E9}", cluster);
        let (cluster, pos) = g.next_from(pos).unwrap();
        assert_eq!("x", cluster);
        assert_eq!(text.len(), pos.offset);
        assert_eq!(None, g.next_from(pos));

        // the same step from the start always gives the same answer
        let first = g.next_from(GraphemePosition::start());
        assert_eq!(first, g.next_from(GraphemePosition::start()));
        assert_eq!(Some("\u{1F1E6}\u{1F1E7}"), first.map(|(cluster, _)| cluster));
    }

    #[test]
    fn test_equality_delegates_to_source() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn calc_hash<T: Hash>(v: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            v.hash(&mut hasher);
            hasher.finish()
        }

        let owned = String::from("abc");
        assert_eq!(graphemes("abc"), graphemes(owned.as_str()));
        assert_ne!(graphemes("abc"), graphemes("abd"));
        assert!(graphemes("abc") < graphemes("abd"));
        assert_eq!(calc_hash(&"abc"), calc_hash(&graphemes("abc")));
    }
}
