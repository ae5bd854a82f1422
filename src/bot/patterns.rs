//! Ordered command table.
//!
//! Every inbound text is tested against the named patterns in order and the
//! first match decides the intent. Text matching none of them falls through
//! to [`Intent::Unknown`].

use regex::Regex;
use std::sync::OnceLock;

use crate::database::store::NewReminder;

/// What a chat message asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Help,
    Link,
    Remind(NewReminder),
    List { is_today: bool },
    /// Catch-all. `mentions_remind` picks between the two invalid replies.
    Unknown { mentions_remind: bool },
}

/// Names of the pattern table rows, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Start,
    Help,
    Link,
    Remind,
    List,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Start => "start",
            PatternKind::Help => "help",
            PatternKind::Link => "link",
            PatternKind::Remind => "remind",
            PatternKind::List => "list",
        }
    }
}

pub struct Pattern {
    pub kind: PatternKind,
    pub regex: Regex,
}

const TABLE: [(PatternKind, &str); 5] = [
    (PatternKind::Start, r"^/start(?:@\w+)?\s*$"),
    (PatternKind::Help, r"^/help(?:@\w+)?\s*$"),
    (PatternKind::Link, r"^/link(?:@\w+)?\s*$"),
    (
        PatternKind::Remind,
        r"^/remind(?:@\w+)?\s+(.+)\s+(\d{1,2}\.\d{1,2}\.\d{4})\s+(\d{1,2}:\d{2})\s*$",
    ),
    (
        PatternKind::List,
        r"(?i)^/(?:list(?:\s+today)?|today)(?:@\w+)?\s*$",
    ),
];

/// The compiled table. The patterns are constants, so compilation is
/// checked by the tests below and a failing row is simply skipped.
pub fn patterns() -> &'static [Pattern] {
    static PATTERNS: OnceLock<Vec<Pattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        TABLE
            .iter()
            .filter_map(|(kind, source)| match Regex::new(source) {
                Ok(regex) => Some(Pattern { kind: *kind, regex }),
                Err(e) => {
                    tracing::error!("Invalid {} pattern: {}", kind.as_str(), e);
                    None
                }
            })
            .collect()
    })
}

/// Matches `text` against the table. The first row that matches wins.
pub fn match_intent(text: &str) -> Intent {
    for pattern in patterns() {
        let Some(captures) = pattern.regex.captures(text) else {
            continue;
        };

        return match pattern.kind {
            PatternKind::Start => Intent::Start,
            PatternKind::Help => Intent::Help,
            PatternKind::Link => Intent::Link,
            PatternKind::Remind => Intent::Remind(NewReminder {
                text: captures[1].trim().to_string(),
                date: captures[2].to_string(),
                time: captures[3].to_string(),
            }),
            PatternKind::List => Intent::List {
                is_today: is_today_request(&captures[0]),
            },
        };
    }

    Intent::Unknown {
        mentions_remind: text.contains("remind"),
    }
}

/// A list request is scoped to today when it says `today` or `Today`.
pub fn is_today_request(matched: &str) -> bool {
    matched.contains("today") || matched.contains("Today")
}
