//! Survey key tables — the fixed vocabulary of the influence questionnaire.
//!
//! A semantic key names one (source, domain, polarity) statement, e.g. `role_med_pos`.
//! A compound key is the (source, domain) pair a pos/neg statement couple belongs to.
//! Both are enumerated types so the 9 compound combinations are checked by the compiler.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

use Domain::{Government as Gov, Medical as Med, Technology as Tech};
use Polarity::{Neg, Pos};
use Source::{Family, Peer, Role};

/// Number of answers in a complete survey submission.
pub const SURVEY_LENGTH: usize = 18;

/// Where the influence comes from. Declaration order drives output ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    Peer,
    Family,
    Role,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Peer, Source::Family, Source::Role];

    pub fn code(self) -> &'static str {
        match self {
            Source::Peer => "peer",
            Source::Family => "family",
            Source::Role => "role",
        }
    }
}

/// Career domain the survey scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Domain {
    Technology,
    Medical,
    Government,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Technology, Domain::Medical, Domain::Government];

    /// Short code used inside semantic and compound keys.
    pub fn code(self) -> &'static str {
        match self {
            Domain::Technology => "tech",
            Domain::Medical => "med",
            Domain::Government => "gov",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Domain::Technology => "Technology",
            Domain::Medical => "Medical",
            Domain::Government => "Government",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a statement is phrased in favour of (`Pos`) or against (`Neg`) the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Polarity {
    Pos,
    Neg,
}

impl Polarity {
    pub fn code(self) -> &'static str {
        match self {
            Polarity::Pos => "pos",
            Polarity::Neg => "neg",
        }
    }
}

/// A (source, domain) pair, rendered `peer_tech`.
///
/// Field order makes the derived ordering group by domain first, then source,
/// which is the order bias scores are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompoundKey {
    pub domain: Domain,
    pub source: Source,
}

impl CompoundKey {
    pub const fn new(source: Source, domain: Domain) -> Self {
        Self { domain, source }
    }

    /// All 9 compound keys in reporting order.
    #[cfg(test)]
    pub fn all() -> impl Iterator<Item = CompoundKey> {
        Domain::ALL.into_iter().flat_map(|domain| {
            Source::ALL
                .into_iter()
                .map(move |source| CompoundKey::new(source, domain))
        })
    }
}

impl fmt::Display for CompoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.source.code(), self.domain.code())
    }
}

impl Serialize for CompoundKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One survey statement: compound key plus polarity, rendered `role_med_pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticKey {
    pub compound: CompoundKey,
    pub polarity: Polarity,
}

impl SemanticKey {
    pub const fn new(source: Source, domain: Domain, polarity: Polarity) -> Self {
        Self {
            compound: CompoundKey::new(source, domain),
            polarity,
        }
    }

    /// 1-based question number of this statement in the survey.
    pub fn question_number(self) -> usize {
        QUESTION_ORDER
            .iter()
            .position(|k| *k == self)
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }
}

impl fmt::Display for SemanticKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.compound, self.polarity.code())
    }
}

/// Positional table: answer index → statement. The ordering is part of the
/// survey contract; the client submits answers in exactly this order.
pub const QUESTION_ORDER: [SemanticKey; SURVEY_LENGTH] = [
    SemanticKey::new(Role, Med, Pos),
    SemanticKey::new(Peer, Tech, Neg),
    SemanticKey::new(Family, Gov, Pos),
    SemanticKey::new(Peer, Med, Pos),
    SemanticKey::new(Role, Tech, Neg),
    SemanticKey::new(Family, Tech, Pos),
    SemanticKey::new(Peer, Gov, Neg),
    SemanticKey::new(Family, Med, Pos),
    SemanticKey::new(Role, Gov, Pos),
    SemanticKey::new(Family, Tech, Neg),
    SemanticKey::new(Role, Med, Neg),
    SemanticKey::new(Peer, Tech, Pos),
    SemanticKey::new(Family, Gov, Neg),
    SemanticKey::new(Peer, Med, Neg),
    SemanticKey::new(Role, Tech, Pos),
    SemanticKey::new(Peer, Gov, Pos),
    SemanticKey::new(Family, Med, Neg),
    SemanticKey::new(Role, Gov, Neg),
];

/// Rendered semantic key → statement, built once from [`QUESTION_ORDER`].
static SEMANTIC_KEYS: Lazy<HashMap<String, SemanticKey>> = Lazy::new(|| {
    QUESTION_ORDER
        .iter()
        .map(|key| (key.to_string(), *key))
        .collect()
});

/// Resolves a rendered key against the survey table.
pub fn lookup_semantic_key(key: &str) -> Option<SemanticKey> {
    SEMANTIC_KEYS.get(key).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_question_order_covers_every_key_once() {
        let unique: HashSet<_> = QUESTION_ORDER.iter().collect();
        assert_eq!(unique.len(), SURVEY_LENGTH);
        for compound in CompoundKey::all() {
            for polarity in [Polarity::Pos, Polarity::Neg] {
                assert!(unique.contains(&SemanticKey { compound, polarity }));
            }
        }
    }

    #[test]
    fn test_rendering_matches_wire_names() {
        assert_eq!(QUESTION_ORDER[0].to_string(), "role_med_pos");
        assert_eq!(QUESTION_ORDER[1].to_string(), "peer_tech_neg");
        assert_eq!(QUESTION_ORDER[17].to_string(), "role_gov_neg");
        assert_eq!(CompoundKey::new(Family, Tech).to_string(), "family_tech");
    }

    #[test]
    fn test_lookup_round_trips_table() {
        for key in QUESTION_ORDER {
            assert_eq!(lookup_semantic_key(&key.to_string()), Some(key));
        }
        assert_eq!(lookup_semantic_key("mentor_tech_pos"), None);
        assert_eq!(lookup_semantic_key("role_med"), None);
    }

    #[test]
    fn test_question_numbers_are_one_based() {
        assert_eq!(SemanticKey::new(Role, Med, Pos).question_number(), 1);
        assert_eq!(SemanticKey::new(Role, Gov, Neg).question_number(), 18);
    }

    #[test]
    fn test_compound_keys_in_reporting_order() {
        let rendered: Vec<String> = CompoundKey::all().map(|k| k.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "peer_tech",
                "family_tech",
                "role_tech",
                "peer_med",
                "family_med",
                "role_med",
                "peer_gov",
                "family_gov",
                "role_gov",
            ]
        );
    }
}
