//! Word-level text normalizer.
//!
//! Turns one raw line of prose into the space-separated lowercase word list
//! the [`LineTokenizer`](super::tokenizer::LineTokenizer) expects:
//!
//! - letters and digits are kept, lowercased (Unicode-aware)
//! - an apostrophe is kept only between two word characters (`don't`,
//!   `darcy's`); quoting apostrophes are dropped
//! - everything else, including `_` italics markers and `--` dashes, becomes
//!   a single space
//! - no leading, trailing or repeated spaces
//!
//! With `strip_diacritics`, Latin accents are folded away ("café" -> "cafe").

/// Configuration options for text normalization.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizerConfig {
    /// When enabled, strips diacritical marks from Latin characters.
    pub strip_diacritics: bool,
}

/// Line normalizer.
///
/// # Examples
///
/// ```
/// use sentiarc_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(
///     normalizer.normalize("\"_Very_ well--I'm glad!\""),
///     "very well i'm glad"
/// );
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

/// Output state while scanning a line.
struct Writer<'a> {
    out: &'a mut String,
    in_word: bool,
    gap: bool,
}

impl Writer<'_> {
    #[inline(always)]
    fn word_char(&mut self, c: char) {
        if self.gap && !self.out.is_empty() {
            self.out.push(' ');
        }
        self.gap = false;
        self.in_word = true;
        self.out.push(c);
    }

    #[inline(always)]
    fn separator(&mut self) {
        self.in_word = false;
        self.gap = true;
    }
}

#[inline(always)]
const fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}

#[inline(always)]
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizes `input` into `out`, reusing its capacity.
    ///
    /// `out` is cleared first.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let strip = self.config.strip_diacritics;
        let mut w = Writer {
            out,
            in_word: false,
            gap: false,
        };
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_ascii() {
                if ch.is_ascii_alphanumeric() {
                    w.word_char(ch.to_ascii_lowercase());
                } else if ch == '\''
                    && w.in_word
                    && chars.peek().is_some_and(|c| c.is_alphanumeric())
                {
                    w.out.push('\'');
                } else {
                    w.separator();
                }
                continue;
            }

            if is_apostrophe(ch) {
                if w.in_word && chars.peek().is_some_and(|c| c.is_alphanumeric()) {
                    w.out.push('\'');
                } else {
                    w.separator();
                }
                continue;
            }

            if is_combining_mark(ch) {
                if w.in_word && !strip {
                    w.out.push(ch);
                }
                continue;
            }

            // 'İ' lowers to 'i' + U+0307
            for lowered in ch.to_lowercase() {
                if is_combining_mark(lowered) {
                    if w.in_word && !strip {
                        w.out.push(lowered);
                    }
                    continue;
                }
                let folded = if strip { fold_latin1(lowered) } else { lowered };
                if folded.is_alphanumeric() {
                    w.word_char(folded);
                } else {
                    w.separator();
                }
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

fn fold_latin1(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' | 'æ' => 'a',
        'ç' | 'ć' | 'č' | 'ĉ' | 'ċ' => 'c',
        'ð' | 'đ' => 'd',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ñ' | 'ń' | 'ň' | 'ņ' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' | 'ŏ' | 'ő' | 'ø' | 'œ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ś' | 'š' | 'ş' | 'ß' => 's',
        'ź' | 'ž' | 'ż' => 'z',
        'ł' => 'l',
        _ => c,
    }
}
