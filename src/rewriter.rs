use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::SkipConfig;
use crate::encoding::SourceLine;
use crate::scanner::FileKind;
use crate::translation_service::Translate;

// @module: Line classification and span rewriting

// @const: Shell comment, `#` must be followed by whitespace so `#!` and URL anchors never fire
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<pre>.*?)(?P<mark>#\s+)(?P<text>.*)$").unwrap()
});

// @const: Quoted argument of an output command, evaluated per occurrence
static COMMAND_STRING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:echo|printf|logger|log)\s+(?:-[a-zA-Z]+\s+)?["'](?P<text>.*?)["']"#).unwrap()
});

// @const: Markdown structural prefix (headings, bullets, ordered lists, blockquotes)
static MD_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>\s*(?:#+|-|\*|\d+\.|>)\s+)?(?P<prose>.*)$").unwrap()
});

// @const: Markdown link-reference definition, passed through untouched
static LINK_REF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[[^\]]*\]:").unwrap());

// @const: Spans that are only punctuation and digits
static PURE_SYMBOLS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\W\d]+$").unwrap());

// @const: IPv4-style dotted quad
static IP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\d+\.\d+\.\d+").unwrap());

// @const: Filesystem-path-looking substring: absolute path, or a chain of two
// or more slash-joined ASCII components
static PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|[\s"'=(])/(?:[A-Za-z0-9._-]+/?)+|[A-Za-z0-9._-]+(?:/[A-Za-z0-9._-]+){2,}"#)
        .unwrap()
});

/// Check for at least one character in the Unicode Cyrillic block
pub fn contains_cyrillic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}

/// Code-like suppression predicates, each individually toggleable.
///
/// A span matching any enabled predicate is preserved untranslated.
#[derive(Debug, Clone)]
pub struct SkipRules {
    pure_symbols: bool,
    variables: bool,
    paths: bool,
    ip_addresses: bool,
}

impl Default for SkipRules {
    fn default() -> Self {
        Self {
            pure_symbols: true,
            variables: true,
            paths: true,
            ip_addresses: true,
        }
    }
}

impl SkipRules {
    /// Build the rule set from the skip section of the config
    pub fn from_config(config: &SkipConfig) -> Self {
        Self {
            pure_symbols: config.pure_symbols,
            variables: config.variables,
            paths: config.paths,
            ip_addresses: config.ip_addresses,
        }
    }

    /// First enabled predicate the span matches, if any
    pub fn suppression_reason(&self, text: &str) -> Option<&'static str> {
        if self.pure_symbols && PURE_SYMBOLS_RE.is_match(text) {
            return Some("pure symbols/digits");
        }
        if self.variables && text.contains('$') {
            return Some("shell variable");
        }
        if self.paths && PATH_RE.is_match(text) {
            return Some("filesystem path");
        }
        if self.ip_addresses && IP_RE.is_match(text) {
            return Some("IP address");
        }
        None
    }

    /// Whether the span is preserved under this policy
    pub fn is_code_like(&self, text: &str) -> bool {
        self.suppression_reason(text).is_some()
    }
}

/// Truncate a span for log lines
fn preview(text: &str) -> String {
    let mut shortened: String = text.chars().take(20).collect();
    if shortened.len() < text.len() {
        shortened.push_str("...");
    }
    shortened
}

/// Rewrites the lines of one candidate file.
///
/// Classification is per line and per span; the translation collaborator is
/// only consulted for Cyrillic-bearing spans that pass the skip rules. Any
/// collaborator failure leaves the span untouched and the pass continues.
pub struct LineRewriter<'a> {
    // @field: Translation collaborator
    translator: &'a dyn Translate,

    // @field: Code-like suppression policy
    rules: SkipRules,
}

impl<'a> LineRewriter<'a> {
    pub fn new(translator: &'a dyn Translate, rules: SkipRules) -> Self {
        Self { translator, rules }
    }

    /// Rewrite a full line sequence for the given file kind.
    ///
    /// Returns the new lines and whether any span actually changed.
    pub async fn rewrite(&self, kind: FileKind, lines: &[SourceLine]) -> (Vec<SourceLine>, bool) {
        match kind {
            FileKind::Shell => self.rewrite_shell(lines).await,
            FileKind::Markdown => self.rewrite_markdown(lines).await,
        }
    }

    async fn rewrite_shell(&self, lines: &[SourceLine]) -> (Vec<SourceLine>, bool) {
        let mut out = Vec::with_capacity(lines.len());
        let mut modified = false;

        for line in lines {
            match self.rewrite_shell_line(&line.text).await {
                Some(rewritten) => {
                    out.push(line.with_text(rewritten));
                    modified = true;
                }
                None => out.push(line.clone()),
            }
        }

        (out, modified)
    }

    /// Rewrite one shell line, returning Some only if a span changed
    async fn rewrite_shell_line(&self, text: &str) -> Option<String> {
        // Shebang lines pass through regardless of content
        if text.trim_start().starts_with("#!") {
            return None;
        }

        let mut current = text.to_string();
        let mut changed = false;

        // Comment span first; the string pass below runs on the rewritten line
        let comment_parts = COMMENT_RE.captures(&current).map(|caps| {
            (
                caps.name("pre").map_or("", |m| m.as_str()).to_string(),
                caps.name("mark").map_or("", |m| m.as_str()).to_string(),
                caps.name("text").map_or("", |m| m.as_str()).to_string(),
            )
        });
        if let Some((pre, mark, comment)) = comment_parts {
            if let Some(translated) = self.translate_span(&comment).await {
                current = format!("{pre}{mark}{translated}");
                changed = true;
            }
        }

        // Quoted output-command spans, each evaluated independently
        let spans: Vec<(usize, usize, String)> = COMMAND_STRING_RE
            .captures_iter(&current)
            .filter_map(|caps| caps.name("text"))
            .map(|m| (m.start(), m.end(), m.as_str().to_string()))
            .collect();

        if !spans.is_empty() {
            let mut rebuilt = String::with_capacity(current.len());
            let mut last = 0usize;
            let mut any_string_changed = false;
            for (start, end, span_text) in spans {
                if let Some(translated) = self.translate_span(&span_text).await {
                    rebuilt.push_str(&current[last..start]);
                    rebuilt.push_str(&translated);
                    last = end;
                    any_string_changed = true;
                }
            }
            if any_string_changed {
                rebuilt.push_str(&current[last..]);
                current = rebuilt;
                changed = true;
            }
        }

        changed.then_some(current)
    }

    async fn rewrite_markdown(&self, lines: &[SourceLine]) -> (Vec<SourceLine>, bool) {
        let mut out = Vec::with_capacity(lines.len());
        let mut in_code_block = false;
        let mut modified = false;

        for line in lines {
            let trimmed = line.text.trim();

            // Fence lines toggle the block state and always pass through
            if trimmed.starts_with("```") {
                in_code_block = !in_code_block;
                out.push(line.clone());
                continue;
            }

            if in_code_block
                || trimmed.is_empty()
                || trimmed.starts_with('<')
                || LINK_REF_RE.is_match(&line.text)
            {
                out.push(line.clone());
                continue;
            }

            if !contains_cyrillic(&line.text) {
                out.push(line.clone());
                continue;
            }

            // Split off the structural prefix, translate the prose remainder
            let caps = MD_PREFIX_RE
                .captures(&line.text)
                .expect("prefix pattern matches any line");
            let prefix = caps.name("prefix").map_or("", |m| m.as_str());
            let prose = caps.name("prose").map_or("", |m| m.as_str());

            match self.translate_span(prose).await {
                Some(translated) => {
                    out.push(line.with_text(format!("{prefix}{translated}")));
                    modified = true;
                }
                None => out.push(line.clone()),
            }
        }

        (out, modified)
    }

    /// Gate, suppress, translate. Returns Some only when the span text changed.
    async fn translate_span(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() || !contains_cyrillic(text) {
            return None;
        }

        if let Some(reason) = self.rules.suppression_reason(text) {
            debug!("Skip ({}): {}", reason, preview(text));
            return None;
        }

        match self.translator.translate(text).await {
            Ok(translated) => {
                if translated != text {
                    debug!("'{}' -> '{}'", preview(text), preview(&translated));
                    Some(translated)
                } else {
                    None
                }
            }
            Err(e) => {
                warn!("Translating '{}' failed: {}", preview(text), e);
                None
            }
        }
    }
}
