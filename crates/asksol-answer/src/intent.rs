use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Greet,
    Smalltalk,
    Campus,
    Unknown,
}

const GREETING_REPLY: &str =
    "Hello 👋 I'm AskSol. What questions do you have about courses, admissions, fees, or campus life?";
const SMALLTALK_REPLY: &str =
    "I'm doing great! Thanks for asking. How can I help with your college-related queries?";
const CAMPUS_REPLY: &str = "Our campus has hostels, a central library, Wi-Fi, a canteen, clubs & societies, \
     sports facilities, and an on-site medical clinic. Which of these would you like to know more about?";

impl Intent {
    /// Fixed reply and confidence for intents that never reach retrieval.
    pub fn canned_reply(self) -> Option<(&'static str, u8)> {
        match self {
            Intent::Greet => Some((GREETING_REPLY, 10)),
            Intent::Smalltalk => Some((SMALLTALK_REPLY, 8)),
            Intent::Campus => Some((CAMPUS_REPLY, 8)),
            Intent::Unknown => None,
        }
    }
}

struct Patterns {
    greeting: Regex,
    smalltalk: Regex,
    campus: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        greeting: Regex::new(r"(?i)\b(hi|hello|hey|good morning|good afternoon|good evening|greetings)\b")
            .expect("valid greeting pattern"),
        smalltalk: Regex::new(r"(?i)\b(how are you|how's it going|how are u|what's up|whats up|how you doing)\b")
            .expect("valid smalltalk pattern"),
        campus: Regex::new(
            r"(?i)\b(campus|hostel|library|canteen|mess|clubs|societies|wifi|wi-fi|sports|safety|medical|clinic|transport|counseling|counsellor)\b",
        )
        .expect("valid campus pattern"),
    })
}

/// Greeting beats small talk, which beats campus keywords.
pub fn detect_intent(text: &str) -> Intent {
    let p = patterns();
    if p.greeting.is_match(text) {
        Intent::Greet
    } else if p.smalltalk.is_match(text) {
        Intent::Smalltalk
    } else if p.campus.is_match(text) {
        Intent::Campus
    } else {
        Intent::Unknown
    }
}
