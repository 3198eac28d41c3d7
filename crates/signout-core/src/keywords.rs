//! Keyword sets and the substring matcher used by the rubric.
//!
//! Matching is unanchored: a keyword may occur anywhere, including inside a
//! longer word ("iv" matches "arrival", "o2" matches "SpO2"). Rubric scores
//! depend on this, so changing it means bumping the rubric version.

/// A named, fixed set of lowercase trigger substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordSet {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

impl KeywordSet {
    /// Returns `true` if any keyword occurs in `text`, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        matches(text, self)
    }
}

/// Lower-case `text` once and look for any keyword of `set` as a substring.
pub fn matches(text: &str, set: &KeywordSet) -> bool {
    let lowered = text.to_lowercase();
    set.keywords.iter().any(|keyword| lowered.contains(keyword))
}

/// Time, threshold, and escalation cues for list items.
pub const THRESHOLD: KeywordSet = KeywordSet {
    name: "threshold",
    keywords: &[
        "if", "when", "call", "page", "notify", "escalate", "threshold", ">", "<", "above",
        "below", "within", "hour", "q1h", "q2h", "q4h", "overnight", "tonight", "recheck",
        "repeat",
    ],
};

/// Working-diagnosis cues for the patient summary.
pub const DIAGNOSIS: KeywordSet = KeywordSet {
    name: "diagnosis",
    keywords: &[
        "admitted for",
        "admitted with",
        "presenting with",
        "diagnos",
        "dx",
        "hx",
        "history of",
        "pneumonia",
        "sepsis",
        "septic",
        "chf",
        "heart failure",
        "copd",
        "asthma",
        "dka",
        "stemi",
        "stroke",
        "aki",
        "uti",
        "cellulitis",
        "embolism",
        "dvt",
        "bleed",
        "pancreatitis",
        "cirrhosis",
    ],
};

/// Current status and trajectory cues for the patient summary.
pub const STATUS: KeywordSet = KeywordSet {
    name: "status",
    keywords: &[
        "stable",
        "improving",
        "improved",
        "worsening",
        "unchanged",
        "afebrile",
        "febrile",
        "vitals",
        "hemodynamic",
        "bp",
        "heart rate",
        "tachy",
        "brady",
        "hypotens",
        "hypox",
        "sat",
        "o2",
        "room air",
        "nasal cannula",
        "alert",
        "oriented",
        "trending",
    ],
};

/// Active treatment cues for the patient summary.
pub const TREATMENT: KeywordSet = KeywordSet {
    name: "treatment",
    keywords: &[
        "iv",
        "abx",
        "antibiotic",
        "vanc",
        "zosyn",
        "ceftriaxone",
        "cefepime",
        "heparin",
        "insulin",
        "diuresis",
        "diuretic",
        "lasix",
        "furosemide",
        "fluid",
        "bolus",
        "transfus",
        "steroid",
        "prednisone",
        "nebs",
        "albuterol",
        "started on",
        "continue",
        "dose",
    ],
};

/// Closed-loop acknowledgement cues for the receiver synthesis.
pub const ACKNOWLEDGEMENT: KeywordSet = KeywordSet {
    name: "acknowledgement",
    keywords: &[
        "i will",
        "i'll",
        "will call",
        "will check",
        "will follow up",
        "will monitor",
        "will page",
        "will escalate",
        "will recheck",
        "plan to",
        "plan is",
        "my plan",
        "understood",
        "i understand",
        "confirm",
        "read back",
    ],
};
