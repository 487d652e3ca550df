use crate::document::{Document, WordCursor};
use crate::font::TextMeasure;
use crate::layout::LayoutBox;
use tracing::debug;

/// Controls what happens when a page fills up with only a few words left.
///
/// When the next word would overflow the bottom of the page and no more than
/// `max_trailing_words` words remain in the whole document, they are squeezed onto the
/// current page (below the nominal bottom limit) instead of spilling onto a nearly
/// empty extra page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OrphanPolicy {
    pub max_trailing_words: usize,
}

impl Default for OrphanPolicy {
    fn default() -> Self {
        OrphanPolicy {
            max_trailing_words: 3,
        }
    }
}

/// A word and where it is drawn. `x` is the left edge and `y` the baseline, both
/// measured from the top-left corner of the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Placement<'a> {
    pub text: &'a str,
    pub x: u32,
    pub y: u32,
}

/// The words laid out on a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout<'a> {
    /// Where this page started in the document
    pub start: WordCursor,
    pub placements: Vec<Placement<'a>>,
    /// The first word that did not fit, or [None] if the document is finished
    pub remainder: Option<WordCursor>,
}

/// Lays out words from `start` onto one page, greedily filling lines from left to
/// right and then moving down.
///
/// * a word that would cross `max_width` moves to the next line first; words are never
///   split, so a word wider than the whole line is still drawn and sticks out to the
///   right
/// * every source line starts on a fresh line
/// * a word whose line would cross `max_height` ends the page, unless the
///   [OrphanPolicy] lets the last few words through or the word is the page's own
///   `start`, which is always placed so that a page too short for a line still
///   advances. Leading blank lines can therefore leave a page empty.
///
/// The returned [PageLayout::remainder] is where the next page should start.
pub fn layout_page<'a, M: TextMeasure + ?Sized>(
    document: &'a Document,
    start: WordCursor,
    layout_box: &LayoutBox,
    metrics: &M,
    policy: OrphanPolicy,
) -> PageLayout<'a> {
    let line_height = metrics.line_height();
    let space_width = metrics.space_width();
    let line_advance = line_height + layout_box.line_spacing;
    let max_width = layout_box.max_width();
    let max_height = layout_box.max_height();

    let mut x = layout_box.margin;
    let mut y = layout_box.margin + line_height;
    let mut remaining = document.words_from(start);

    let mut placements: Vec<Placement> = Vec::with_capacity(remaining);
    let last_line = document.lines.len().saturating_sub(1);

    for (li, line) in document.lines.iter().enumerate().skip(start.line) {
        let first_word = if li == start.line { start.word } else { 0 };

        for (wi, word) in line.iter().enumerate().skip(first_word) {
            let word_width = metrics.measure(word);
            if x + word_width > max_width {
                x = layout_box.margin;
                y += line_advance;
            }

            let cursor = WordCursor::new(li, wi);
            if y + line_height > max_height
                && remaining > policy.max_trailing_words
                && cursor != start
            {
                let remainder = cursor;
                debug!(
                    placed = placements.len(),
                    remaining,
                    line = remainder.line,
                    word = remainder.word,
                    "page full"
                );
                return PageLayout {
                    start,
                    placements,
                    remainder: Some(remainder),
                };
            }

            placements.push(Placement {
                text: word.as_str(),
                x,
                y,
            });
            x += word_width + space_width;
            remaining -= 1;
        }

        // source lines always start on a fresh line
        if li < last_line || remaining > 0 {
            x = layout_box.margin;
            y += line_advance;
        }
    }

    debug!(placed = placements.len(), "document finished");
    PageLayout {
        start,
        placements,
        remainder: None,
    }
}

/// Iterates over the pages of a document, starting each page where the previous one
/// left off. Always yields at least one page, even for a document without words.
pub struct Paginator<'a, M: TextMeasure> {
    document: &'a Document,
    layout_box: LayoutBox,
    metrics: M,
    policy: OrphanPolicy,
    next: Option<WordCursor>,
}

impl<'a, M: TextMeasure> Paginator<'a, M> {
    pub fn new(document: &'a Document, layout_box: LayoutBox, metrics: M) -> Self {
        Paginator {
            document,
            layout_box,
            metrics,
            policy: OrphanPolicy::default(),
            next: Some(WordCursor::default()),
        }
    }

    pub fn with_policy(mut self, policy: OrphanPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<'a, M: TextMeasure> Iterator for Paginator<'a, M> {
    type Item = PageLayout<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next.take()?;
        let page = layout_page(
            self.document,
            start,
            &self.layout_box,
            &self.metrics,
            self.policy,
        );
        self.next = page.remainder;
        Some(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is `char_width` wide, spaces are `space` wide
    struct FixedMetrics {
        line_height: u32,
        char_width: u32,
        space: u32,
    }

    impl TextMeasure for FixedMetrics {
        fn line_height(&self) -> u32 {
            self.line_height
        }

        fn measure(&self, text: &str) -> u32 {
            text.chars().count() as u32 * self.char_width
        }

        fn space_width(&self) -> u32 {
            self.space
        }
    }

    const METRICS: FixedMetrics = FixedMetrics {
        line_height: 10,
        char_width: 8,
        space: 10,
    };

    fn positions<'a>(page: &PageLayout<'a>) -> Vec<(&'a str, u32, u32)> {
        page.placements.iter().map(|p| (p.text, p.x, p.y)).collect()
    }

    fn words(n: usize) -> String {
        (0..n)
            .map(|i| format!("wrd{i:02}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn two_words_share_a_line() {
        let doc = Document::from_text("Hello World");
        let page = layout_page(
            &doc,
            WordCursor::default(),
            &LayoutBox::new(100, 100, 0, 0),
            &METRICS,
            OrphanPolicy::default(),
        );
        assert_eq!(positions(&page), vec![("Hello", 0, 10), ("World", 50, 10)]);
        assert_eq!(page.remainder, None);
    }

    #[test]
    fn wraps_words_past_the_right_edge() {
        let doc = Document::from_text("aaaaa bbbbb ccccc");
        let page = layout_page(
            &doc,
            WordCursor::default(),
            &LayoutBox::new(100, 100, 0, 5),
            &METRICS,
            OrphanPolicy::default(),
        );
        assert_eq!(
            positions(&page),
            vec![("aaaaa", 0, 10), ("bbbbb", 50, 10), ("ccccc", 0, 25)]
        );
    }

    #[test]
    fn starts_inside_the_margin() {
        let doc = Document::from_text("hi");
        let page = layout_page(
            &doc,
            WordCursor::default(),
            &LayoutBox::new(200, 200, 20, 0),
            &METRICS,
            OrphanPolicy::default(),
        );
        assert_eq!(positions(&page), vec![("hi", 20, 30)]);
    }

    #[test]
    fn source_lines_force_breaks() {
        let doc = Document::from_text("a\nb\n\nc");
        let page = layout_page(
            &doc,
            WordCursor::default(),
            &LayoutBox::new(100, 100, 0, 2),
            &METRICS,
            OrphanPolicy::default(),
        );
        assert_eq!(
            positions(&page),
            vec![("a", 0, 10), ("b", 0, 22), ("c", 0, 46)]
        );
    }

    #[test]
    fn three_trailing_words_stay_on_the_page() {
        // two words per line, three lines fit in 30px
        let doc = Document::from_text(&words(7));
        let pages: Vec<_> =
            Paginator::new(&doc, LayoutBox::new(100, 30, 0, 0), &METRICS).collect();

        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        assert_eq!(page.placements.len(), 7);
        assert_eq!(page.remainder, None);
        // the last word sits below the nominal bottom
        assert_eq!(page.placements[6].y, 40);
    }

    #[test]
    fn four_trailing_words_start_a_new_page() {
        let doc = Document::from_text(&words(8));
        let pages: Vec<_> =
            Paginator::new(&doc, LayoutBox::new(100, 30, 0, 0), &METRICS).collect();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].placements.len(), 4);
        assert_eq!(pages[0].remainder, Some(WordCursor::new(0, 4)));
        assert_eq!(pages[1].start, WordCursor::new(0, 4));
        assert_eq!(pages[1].placements[0].text, "wrd04");
        assert_eq!((pages[1].placements[0].x, pages[1].placements[0].y), (0, 10));
        assert_eq!(pages[1].placements.len(), 4);
        assert_eq!(pages[1].remainder, None);
    }

    #[test]
    fn trailing_words_are_counted_across_lines() {
        let layout_box = LayoutBox::new(100, 30, 0, 0);

        let doc = Document::from_text("aaaaa bbbbb ccccc ddddd\neeeee fffff\nggggg hhhhh");
        let page = layout_page(
            &doc,
            WordCursor::default(),
            &layout_box,
            &METRICS,
            OrphanPolicy::default(),
        );
        assert_eq!(page.placements.len(), 4);
        assert_eq!(page.remainder, Some(WordCursor::new(1, 0)));

        let doc = Document::from_text("aaaaa bbbbb ccccc ddddd\neeeee fffff\nggggg");
        let page = layout_page(
            &doc,
            WordCursor::default(),
            &layout_box,
            &METRICS,
            OrphanPolicy::default(),
        );
        assert_eq!(page.placements.len(), 7);
        assert_eq!(page.remainder, None);
    }

    #[test]
    fn remainder_resumes_mid_line() {
        let doc = Document::from_text(&format!("{}\ntail end", words(6)));
        let layout_box = LayoutBox::new(100, 30, 0, 0);
        let first = layout_page(
            &doc,
            WordCursor::default(),
            &layout_box,
            &METRICS,
            OrphanPolicy::default(),
        );
        assert_eq!(first.remainder, Some(WordCursor::new(0, 4)));

        let second = layout_page(
            &doc,
            WordCursor::new(0, 4),
            &layout_box,
            &METRICS,
            OrphanPolicy::default(),
        );
        let texts: Vec<_> = second.placements.iter().map(|p| p.text).collect();
        assert_eq!(texts, vec!["wrd04", "wrd05", "tail", "end"]);
        assert_eq!(second.remainder, None);
    }

    #[test]
    fn policy_threshold_is_tunable() {
        let doc = Document::from_text(&words(7));
        let pages: Vec<_> = Paginator::new(&doc, LayoutBox::new(100, 30, 0, 0), &METRICS)
            .with_policy(OrphanPolicy {
                max_trailing_words: 0,
            })
            .collect();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].placements.len(), 4);
        assert_eq!(pages[1].placements.len(), 3);
    }

    #[test]
    fn overlong_word_is_still_placed() {
        let doc = Document::from_text("incomprehensibilities ok");
        let page = layout_page(
            &doc,
            WordCursor::default(),
            &LayoutBox::new(100, 100, 0, 0),
            &METRICS,
            OrphanPolicy::default(),
        );
        assert_eq!(page.placements.len(), 2);
        assert_eq!(page.placements[0].text, "incomprehensibilities");
        assert_eq!(page.placements[0].x, 0);
        assert_eq!(page.remainder, None);
    }

    #[test]
    fn empty_document_yields_one_blank_page() {
        let doc = Document::from_text("");
        let pages: Vec<_> =
            Paginator::new(&doc, LayoutBox::new(100, 100, 0, 0), &METRICS).collect();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].placements.is_empty());
        assert_eq!(pages[0].remainder, None);
    }

    #[test]
    fn leading_blank_lines_push_words_to_the_next_page() {
        let doc = Document::from_text(&format!("{}a b c d e f", "\n".repeat(30)));
        let layout_box = LayoutBox::new(100, 100, 0, 0);
        let pages: Vec<_> = Paginator::new(&doc, layout_box, &METRICS).collect();

        assert_eq!(pages.len(), 2);
        assert!(pages[0].placements.is_empty());
        assert_eq!(pages[0].remainder, Some(WordCursor::new(30, 0)));

        let texts: Vec<_> = pages[1].placements.iter().map(|p| p.text).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d", "e", "f"]);
        assert!(pages[1].placements.iter().all(|p| p.y <= layout_box.height));
        assert_eq!(pages[1].remainder, None);
    }

    #[test]
    fn every_page_places_at_least_one_word() {
        // too short for even a single line
        let doc = Document::from_text(&words(20));
        let pages: Vec<_> =
            Paginator::new(&doc, LayoutBox::new(100, 5, 0, 0), &METRICS).collect();
        assert!(pages.iter().all(|p| !p.placements.is_empty()));
        let placed: usize = pages.iter().map(|p| p.placements.len()).sum();
        assert_eq!(placed, 20);
    }

    #[test]
    fn pages_cover_every_word_once_in_order() {
        let text = lipsum::lipsum(400)
            .split(". ")
            .collect::<Vec<_>>()
            .join(".\n");
        let doc = Document::from_text(&text);

        for (width, height, margin, spacing) in [
            (100, 40, 0, 0),
            (240, 120, 10, 4),
            (300, 300, 20, 10),
            (90, 1000, 5, 1),
        ] {
            let layout_box = LayoutBox::new(width, height, margin, spacing);
            let placed: Vec<&str> = Paginator::new(&doc, layout_box, &METRICS)
                .flat_map(|page| page.placements.into_iter().map(|p| p.text))
                .collect();
            assert_eq!(placed, doc.words().collect::<Vec<_>>());
        }
    }
}
