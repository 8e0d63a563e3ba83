use std::{borrow, fmt, hash, ops, ops::Range};

/// A metadata span over a byte range of an [`AnnotatedString`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Annotation<T> {
    /// Byte range the value applies to.
    pub range: Range<usize>,
    /// The attached metadata.
    pub value: T,
}

/// A string carrying out-of-band metadata on byte ranges of its text.
///
/// Transforms that change the encoded length of characters (case mapping
/// can) go through [`map_chars`](AnnotatedString::map_chars), which moves
/// every span along with the characters it covers.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AnnotatedString<T> {
    text: String,
    annotations: Vec<Annotation<T>>,
}

impl<T> AnnotatedString<T> {
    /// Creates a new empty `AnnotatedString`.
    pub const fn new() -> Self {
        AnnotatedString {
            text: String::new(),
            annotations: Vec::new(),
        }
    }

    /// Attaches `value` to `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds or does not lie on character
    /// boundaries.
    pub fn annotate(&mut self, range: Range<usize>, value: T) {
        assert!(
            range.start <= range.end
                && self.text.is_char_boundary(range.start)
                && self.text.is_char_boundary(range.end),
            "annotation range {:?} is not on character boundaries of a {}-byte string",
            range,
            self.text.len()
        );
        self.annotations.push(Annotation { range, value });
    }

    /// Builder form of [`annotate`](Self::annotate).
    pub fn with_annotation(mut self, range: Range<usize>, value: T) -> Self {
        self.annotate(range, value);
        self
    }

    /// Appends text with no annotation.
    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Appends text covered by one annotation.
    pub fn push_annotated(&mut self, s: &str, value: T) {
        let start = self.text.len();
        self.text.push_str(s);
        self.annotations.push(Annotation {
            range: start..self.text.len(),
            value,
        });
    }

    /// The plain text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The spans, in the order they were added.
    pub fn annotations(&self) -> &[Annotation<T>] {
        &self.annotations
    }

    /// Every span covering byte `offset`.
    pub fn annotations_at(&self, offset: usize) -> impl Iterator<Item = &Annotation<T>> + '_ {
        self.annotations
            .iter()
            .filter(move |a| a.range.contains(&offset))
    }

    /// Splits into the plain text and its spans.
    pub fn into_parts(self) -> (String, Vec<Annotation<T>>) {
        (self.text, self.annotations)
    }

    /// Maps every character through `f`, keeping each span attached to the
    /// characters it covered.
    pub fn map_chars<F>(&self, mut f: F) -> AnnotatedString<T>
    where
        F: FnMut(char) -> char,
        T: Clone,
    {
        let mut text = String::with_capacity(self.text.len());
        // new offset of every old char boundary, including the end
        let mut offsets = Vec::with_capacity(self.text.len() + 1);
        for (idx, ch) in self.text.char_indices() {
            offsets.push((idx, text.len()));
            text.push(f(ch));
        }
        offsets.push((self.text.len(), text.len()));

        let remap = |old: usize| match offsets.binary_search_by_key(&old, |&(o, _)| o) {
            Ok(i) => offsets[i].1,
            // annotate() only accepts char boundaries
            Err(_) => unreachable!("annotation offset {} is not a char boundary", old),
        };
        let annotations = self
            .annotations
            .iter()
            .map(|a| Annotation {
                range: remap(a.range.start)..remap(a.range.end),
                value: a.value.clone(),
            })
            .collect();
        AnnotatedString { text, annotations }
    }
}

impl<T> From<String> for AnnotatedString<T> {
    fn from(text: String) -> Self {
        AnnotatedString {
            text,
            annotations: Vec::new(),
        }
    }
}

impl<T> From<&str> for AnnotatedString<T> {
    fn from(text: &str) -> Self {
        AnnotatedString::from(text.to_owned())
    }
}

impl<T: hash::Hash> hash::Hash for AnnotatedString<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.annotations.hash(state);
    }
}

impl<T> PartialEq<str> for AnnotatedString<T> {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl<T> PartialEq<&str> for AnnotatedString<T> {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl<T> fmt::Display for AnnotatedString<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl<T: fmt::Debug> fmt::Debug for AnnotatedString<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotatedString")
            .field("text", &self.text)
            .field("annotations", &self.annotations)
            .finish()
    }
}

impl<T> ops::Deref for AnnotatedString<T> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl<T> borrow::Borrow<str> for AnnotatedString<T> {
    fn borrow(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_query() {
        let mut s = AnnotatedString::new();
        s.push_str("say ");
        s.push_annotated("hello", "bold");
        assert_eq!("say hello", s.as_str());
        assert_eq!(&[Annotation { range: 4..9, value: "bold" }], s.annotations());
        assert_eq!(1, s.annotations_at(4).count());
        assert_eq!(0, s.annotations_at(3).count());
        assert_eq!(9, s.len());
    }

    #[test]
    fn test_map_chars_moves_spans() {
        // 'ı' (2 bytes) uppercases to 'I' (1 byte)
        let s = AnnotatedString::from("ıx").with_annotation(2..3, 7);
        let upper = s.map_chars(|c| if c == 'ı' { 'I' } else { c.to_ascii_uppercase() });
        assert_eq!(upper, "IX");
        assert_eq!(1..2, upper.annotations()[0].range);
        assert_eq!(7, upper.annotations()[0].value);
    }

    #[test]
    #[should_panic]
    fn test_annotate_off_boundary() {
        let mut s: AnnotatedString<()> = "é".into();
        s.annotate(0..1, ());
    }
}
