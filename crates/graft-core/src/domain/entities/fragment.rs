/// An ordered block of lines destined for one marker.
///
/// Fragments are plain data: the builder that produces them decides the
/// text, the injector decides where it goes. `emit == false` keeps the
/// fragment declared but inert, which is how callers switch wiring concerns
/// off without changing the builder's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    marker: String,
    lines: Vec<String>,
    emit: bool,
}

impl Fragment {
    /// Build a fragment from multi-line text.
    ///
    /// A single trailing newline is ignored, so `"a\nb\n"` yields two lines.
    pub fn new(marker: impl Into<String>, text: &str) -> Self {
        let text = text.strip_suffix('\n').unwrap_or(text);
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect()
        };
        Self {
            marker: marker.into(),
            lines,
            emit: true,
        }
    }

    /// Build a fragment from already-split lines.
    pub fn from_lines<I, S>(marker: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            marker: marker.into(),
            lines: lines.into_iter().map(Into::into).collect(),
            emit: true,
        }
    }

    /// Gate emission on a caller-supplied wiring flag.
    pub fn when(mut self, emit: bool) -> Self {
        self.emit = emit;
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_emitted(&self) -> bool {
        self.emit && !self.lines.is_empty()
    }
}
