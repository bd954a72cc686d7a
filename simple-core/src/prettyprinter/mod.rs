use pretty::RcDoc;

mod simple;

pub trait PrettyPrint {
    fn to_doc(&self) -> RcDoc<'_, ()>;

    /// Renders on a single line.
    fn to_pretty(&self) -> String {
        self.to_pretty_width(usize::MAX)
    }

    /// Renders within `width` columns where the layout allows it.
    fn to_pretty_width(&self, width: usize) -> String {
        self.to_doc().pretty(width).to_string()
    }
}

/// Comma-separated list.
pub fn list<'a>(docs: impl IntoIterator<Item = RcDoc<'a, ()>>) -> RcDoc<'a, ()> {
    RcDoc::intersperse(docs, RcDoc::text(",").append(RcDoc::space()))
}

/// Wraps a document in `open` and `close`.
pub fn enclose<'a>(open: &'a str, doc: RcDoc<'a, ()>, close: &'a str) -> RcDoc<'a, ()> {
    RcDoc::text(open).append(doc).append(RcDoc::text(close))
}
