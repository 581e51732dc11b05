//! Title normalization for cross-corpus matching.
//!
//! The naming catalog, the vendor cheat library and the community cheat
//! database all spell the same game slightly differently:
//! ```text
//! Legend of Zelda, The - The Minish Cap (Europe) (En,Fr,De,Es,It)
//! The Legend of Zelda: The Minish Cap
//! Legend of Zelda, The - The Minish Cap (Europe) (Code Breaker)
//! ```
//! [`normalize`] reduces a raw title to a [`TitleKey`] that is equal across
//! those spellings, and moves the region/revision tags into a side channel of
//! [`Disambiguator`]s so regional releases can still be told apart.

use std::collections::BTreeSet;
use std::fmt;

use crate::region::Region;

/// Comparable form of a title: lowercase alphanumeric words separated by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TitleKey(String);

impl TitleKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TitleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A secondary attribute that distinguishes releases sharing a title.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Disambiguator {
    /// Region slug (e.g., "usa", "europe").
    Region(String),
    /// Revision label, lowercase (e.g., "1", "a").
    Revision(String),
    /// Version number without the leading `v` (e.g., "1.1").
    Version(String),
    /// Two or three letter language code, lowercase.
    Language(String),
    /// Any other tag: dump status, "proto", "unl", alternate labels.
    Flag(String),
}

impl fmt::Display for Disambiguator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Region(r) => write!(f, "region:{r}"),
            Self::Revision(r) => write!(f, "rev:{r}"),
            Self::Version(v) => write!(f, "ver:{v}"),
            Self::Language(l) => write!(f, "lang:{l}"),
            Self::Flag(t) => write!(f, "flag:{t}"),
        }
    }
}

/// Result of normalizing a raw title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTitle {
    /// Matching key.
    pub key: TitleKey,
    /// Base title with tags removed, original spelling.
    pub title: String,
    /// First recognized region tag, or [`Region::Unknown`].
    pub region: Region,
    /// Region, revision, language and flag tags.
    pub disambiguators: BTreeSet<Disambiguator>,
    /// Tags that name the cheat device rather than the release (e.g., "Code Breaker").
    pub annotations: Vec<String>,
}

impl NormalizedTitle {
    /// Whether a cheat-device tag names anything other than Code Breaker.
    ///
    /// Untagged titles are assumed to hold Code Breaker codes.
    pub fn names_other_device(&self) -> bool {
        self.annotations
            .iter()
            .any(|tag| !CODE_BREAKER_TAGS.contains(&tag.to_lowercase().as_str()))
    }
}

/// Normalize a raw title into a matching key plus its disambiguators.
///
/// Never fails. A title that reduces to nothing (all punctuation, or only
/// tags) falls back to its trimmed lowercase form.
///
/// # Examples
///
/// ```
/// use cheat_merge_core::normalize::{normalize, Disambiguator};
///
/// let n = normalize("Legend of Zelda, The - The Minish Cap (Europe) (Rev 1)");
/// assert_eq!(n.key.as_str(), "legend of zelda the minish cap");
/// assert!(n.disambiguators.contains(&Disambiguator::Region("europe".into())));
/// assert!(n.disambiguators.contains(&Disambiguator::Revision("1".into())));
///
/// assert_eq!(normalize("Mario & Luigi: Superstar Saga").key.as_str(), "mario and luigi superstar saga");
/// ```
pub fn normalize(raw: &str) -> NormalizedTitle {
    let (title, tags) = extract_title_and_tags(raw);

    let mut result = NormalizedTitle {
        key: TitleKey(String::new()),
        title,
        region: Region::Unknown,
        disambiguators: BTreeSet::new(),
        annotations: Vec::new(),
    };

    for tag in &tags {
        match tag {
            Tag::Paren(content) => classify_paren_tag(content, &mut result),
            Tag::Bracket(content) => classify_bracket_tag(content, &mut result),
        }
    }

    let key = canonical_key(&result.title);
    result.key = if key.is_empty() {
        TitleKey(raw.trim().to_lowercase())
    } else {
        TitleKey(key)
    };

    result
}

// ── Tag extraction ──────────────────────────────────────────────────────────

#[derive(Debug)]
enum Tag {
    Paren(String),
    Bracket(String),
}

/// Split a name into the base title and its (parenthesized) and [bracketed] tags.
fn extract_title_and_tags(name: &str) -> (String, Vec<Tag>) {
    let mut tags = Vec::new();
    let mut title_end = None;
    let mut chars = name.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        let (open, close, make_tag): (char, char, fn(String) -> Tag) = match ch {
            '(' => ('(', ')', Tag::Paren),
            '[' => ('[', ']', Tag::Bracket),
            _ => continue,
        };

        if title_end.is_none() {
            title_end = Some(i);
        }

        let mut depth = 1u32;
        let start = i + open.len_utf8();
        // Unterminated tags run to the end of the name
        let mut end = name.len();

        for (j, c) in chars.by_ref() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    end = j;
                    break;
                }
            }
        }

        let content = name[start..end].trim();
        if !content.is_empty() {
            tags.push(make_tag(content.to_string()));
        }
    }

    let title = match title_end {
        Some(pos) => name[..pos].trim().to_string(),
        None => name.trim().to_string(),
    };

    (title, tags)
}

/// Known region strings in No-Intro/Redump naming.
const KNOWN_REGIONS: &[&str] = &[
    "USA",
    "Japan",
    "Europe",
    "World",
    "Australia",
    "Korea",
    "China",
    "Taiwan",
    "Brazil",
    "France",
    "Germany",
    "Spain",
    "Italy",
    "Netherlands",
    "Sweden",
    "Norway",
    "Denmark",
    "Finland",
    "Portugal",
    "Russia",
    "Hong Kong",
    "Asia",
    "Canada",
    "Mexico",
    "India",
    "United Kingdom",
    "Poland",
    "Greece",
    "Scandinavia",
    "Latin America",
];

const CODE_BREAKER_TAGS: &[&str] = &["code breaker", "codebreaker"];

/// Tags naming the cheat device a community file was written for.
const CHEAT_DEVICE_TAGS: &[&str] = &[
    "code breaker",
    "codebreaker",
    "action replay",
    "action replay max",
    "pro action replay",
    "gameshark",
    "gameshark sp",
    "game genie",
    "xploder",
    "xploder gba",
];

fn is_region_string(s: &str) -> bool {
    s.split(',').all(|part| {
        let trimmed = part.trim();
        KNOWN_REGIONS
            .iter()
            .any(|r| r.eq_ignore_ascii_case(trimmed))
    })
}

fn classify_paren_tag(content: &str, result: &mut NormalizedTitle) {
    let trimmed = content.trim();
    let lower = trimmed.to_lowercase();

    if is_region_string(trimmed) {
        for part in trimmed.split(',') {
            let part = part.trim();
            if result.region == Region::Unknown {
                result.region = Region::from_name(part);
            }
            result
                .disambiguators
                .insert(Disambiguator::Region(region_to_slug(part).to_string()));
        }
        return;
    }

    if let Some(rev) = lower.strip_prefix("rev ") {
        result
            .disambiguators
            .insert(Disambiguator::Revision(rev.trim().to_string()));
        return;
    }

    if lower.len() > 1 && lower.starts_with('v') && lower.as_bytes()[1].is_ascii_digit() {
        result
            .disambiguators
            .insert(Disambiguator::Version(lower[1..].to_string()));
        return;
    }

    if looks_like_language_list(trimmed) {
        for lang in trimmed.split(',') {
            result
                .disambiguators
                .insert(Disambiguator::Language(lang.trim().to_lowercase()));
        }
        return;
    }

    if CHEAT_DEVICE_TAGS.contains(&lower.as_str()) {
        result.annotations.push(trimmed.to_string());
        return;
    }

    result.disambiguators.insert(Disambiguator::Flag(lower));
}

/// Check if a string looks like a language list (comma-separated 2-3 letter codes).
fn looks_like_language_list(s: &str) -> bool {
    let parts: Vec<&str> = s.split(',').collect();
    // Single codes are ambiguous with other short tags
    if parts.len() < 2 {
        return false;
    }
    parts.iter().all(|p| {
        let t = p.trim();
        (2..=3).contains(&t.len())
            && t.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && t.chars().skip(1).all(|c| c.is_ascii_lowercase())
    })
}

fn classify_bracket_tag(content: &str, result: &mut NormalizedTitle) {
    match content.trim() {
        // Verified dump, same release as an untagged name
        "!" => {}
        other => {
            result
                .disambiguators
                .insert(Disambiguator::Flag(format!("[{}]", other.to_lowercase())));
        }
    }
}

/// Map a No-Intro/Redump region string to a lowercase slug.
pub fn region_to_slug(region: &str) -> &'static str {
    match region.trim().to_lowercase().as_str() {
        "usa" | "us" | "united states" => "usa",
        "japan" | "jp" | "jpn" => "japan",
        "europe" | "eu" | "eur" => "europe",
        "world" | "wld" => "world",
        "australia" | "aus" => "australia",
        "korea" | "kor" | "kr" => "korea",
        "china" | "chn" | "cn" => "china",
        "taiwan" | "twn" | "tw" => "taiwan",
        "brazil" | "bra" | "br" => "brazil",
        "france" | "fra" | "fr" => "france",
        "germany" | "ger" | "de" | "deu" => "germany",
        "spain" | "esp" | "es" => "spain",
        "italy" | "ita" | "it" => "italy",
        "netherlands" | "ned" | "nl" | "nld" | "holland" => "netherlands",
        "sweden" | "swe" | "se" => "sweden",
        "norway" | "nor" | "no" => "norway",
        "denmark" | "den" | "dk" | "dnk" => "denmark",
        "finland" | "fin" | "fi" => "finland",
        "portugal" | "por" | "pt" | "prt" => "portugal",
        "russia" | "rus" | "ru" => "russia",
        "hong kong" | "hk" | "hkg" => "hong-kong",
        "asia" => "asia",
        "canada" | "can" | "ca" => "canada",
        "mexico" | "mex" | "mx" => "mexico",
        "india" | "ind" => "india",
        "united kingdom" | "uk" | "gbr" | "gb" => "united-kingdom",
        "poland" | "pol" | "pl" => "poland",
        "greece" | "gre" | "gr" => "greece",
        "scandinavia" => "scandinavia",
        "latin america" => "latin-america",
        _ => "unknown",
    }
}

// ── Key construction ────────────────────────────────────────────────────────

const ARTICLES: &[&str] = &["the", "an", "a"];

fn canonical_key(title: &str) -> String {
    let lower = drop_trailing_article(&title.to_lowercase());

    let mut key = String::with_capacity(lower.len());
    let mut pending_space = false;
    for ch in lower.chars() {
        if ch == '&' {
            if !key.is_empty() {
                key.push(' ');
            }
            key.push_str("and");
            pending_space = true;
        } else if ch == '\'' || ch == '\u{2019}' {
            // "Kirby's" and "Kirbys" are the same word
        } else if ch.is_alphanumeric() {
            if pending_space && !key.is_empty() {
                key.push(' ');
            }
            pending_space = false;
            key.push(ch);
        } else {
            pending_space = true;
        }
    }

    strip_leading_articles(key)
}

/// Remove a No-Intro style moved article: "legend of zelda, the - ..." → "legend of zelda - ...".
fn drop_trailing_article(lower: &str) -> String {
    for article in ARTICLES {
        let needle = format!(", {article}");
        let mut search_from = 0;
        while let Some(pos) = lower[search_from..].find(&needle) {
            let start = search_from + pos;
            let end = start + needle.len();
            let at_word_end = lower[end..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphanumeric());
            if at_word_end {
                return format!("{}{}", &lower[..start], &lower[end..]);
            }
            search_from = end;
        }
    }
    lower.to_string()
}

fn strip_leading_articles(mut key: String) -> String {
    'outer: loop {
        for article in ARTICLES {
            let prefix_len = article.len() + 1;
            if key.len() > prefix_len
                && key.starts_with(article)
                && key.as_bytes()[article.len()] == b' '
            {
                key.drain(..prefix_len);
                continue 'outer;
            }
        }
        return key;
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
