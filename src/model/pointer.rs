//! Semantic pointer kinds.
//!
//! The enumeration order is significant: extraction walks pointer kinds in
//! `PointerKind::ALL` order, so it fixes the order of explicit edges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PartOfSpeech;

/// A typed semantic relation between two senses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointerKind {
    AlsoSee,
    Antonym,
    Attribute,
    Cause,
    DerivationallyRelated,
    DerivedFromAdj,
    Entailment,
    Hypernym,
    HypernymInstance,
    Hyponym,
    HyponymInstance,
    HolonymMember,
    HolonymSubstance,
    HolonymPart,
    MeronymMember,
    MeronymSubstance,
    MeronymPart,
    Participle,
    Pertainym,
    SimilarTo,
    DomainTopic,
    DomainMemberTopic,
    DomainRegion,
    DomainMemberRegion,
    DomainUsage,
    DomainMemberUsage,
    VerbGroup,
}

impl PointerKind {
    pub const ALL: [PointerKind; 27] = [
        PointerKind::AlsoSee,
        PointerKind::Antonym,
        PointerKind::Attribute,
        PointerKind::Cause,
        PointerKind::DerivationallyRelated,
        PointerKind::DerivedFromAdj,
        PointerKind::Entailment,
        PointerKind::Hypernym,
        PointerKind::HypernymInstance,
        PointerKind::Hyponym,
        PointerKind::HyponymInstance,
        PointerKind::HolonymMember,
        PointerKind::HolonymSubstance,
        PointerKind::HolonymPart,
        PointerKind::MeronymMember,
        PointerKind::MeronymSubstance,
        PointerKind::MeronymPart,
        PointerKind::Participle,
        PointerKind::Pertainym,
        PointerKind::SimilarTo,
        PointerKind::DomainTopic,
        PointerKind::DomainMemberTopic,
        PointerKind::DomainRegion,
        PointerKind::DomainMemberRegion,
        PointerKind::DomainUsage,
        PointerKind::DomainMemberUsage,
        PointerKind::VerbGroup,
    ];

    /// Name used in output links (`target|NAME`).
    pub fn name(self) -> &'static str {
        match self {
            PointerKind::AlsoSee => "ALSO_SEE",
            PointerKind::Antonym => "ANTONYM",
            PointerKind::Attribute => "ATTRIBUTE",
            PointerKind::Cause => "CAUSE",
            PointerKind::DerivationallyRelated => "DERIVATIONALLY_RELATED",
            PointerKind::DerivedFromAdj => "DERIVED_FROM_ADJ",
            PointerKind::Entailment => "ENTAILMENT",
            PointerKind::Hypernym => "HYPERNYM",
            PointerKind::HypernymInstance => "HYPERNYM_INSTANCE",
            PointerKind::Hyponym => "HYPONYM",
            PointerKind::HyponymInstance => "HYPONYM_INSTANCE",
            PointerKind::HolonymMember => "HOLONYM_MEMBER",
            PointerKind::HolonymSubstance => "HOLONYM_SUBSTANCE",
            PointerKind::HolonymPart => "HOLONYM_PART",
            PointerKind::MeronymMember => "MERONYM_MEMBER",
            PointerKind::MeronymSubstance => "MERONYM_SUBSTANCE",
            PointerKind::MeronymPart => "MERONYM_PART",
            PointerKind::Participle => "PARTICIPLE",
            PointerKind::Pertainym => "PERTAINYM",
            PointerKind::SimilarTo => "SIMILAR_TO",
            PointerKind::DomainTopic => "DOMAIN_TOPIC",
            PointerKind::DomainMemberTopic => "DOMAIN_MEMBER_TOPIC",
            PointerKind::DomainRegion => "DOMAIN_REGION",
            PointerKind::DomainMemberRegion => "DOMAIN_MEMBER_REGION",
            PointerKind::DomainUsage => "DOMAIN_USAGE",
            PointerKind::DomainMemberUsage => "DOMAIN_MEMBER_USAGE",
            PointerKind::VerbGroup => "VERB_GROUP",
        }
    }

    /// WNDB pointer symbol as written in `data.*` files.
    pub fn symbol(self) -> &'static str {
        match self {
            PointerKind::AlsoSee => "^",
            PointerKind::Antonym => "!",
            PointerKind::Attribute => "=",
            PointerKind::Cause => ">",
            PointerKind::DerivationallyRelated => "+",
            PointerKind::DerivedFromAdj => "\\",
            PointerKind::Entailment => "*",
            PointerKind::Hypernym => "@",
            PointerKind::HypernymInstance => "@i",
            PointerKind::Hyponym => "~",
            PointerKind::HyponymInstance => "~i",
            PointerKind::HolonymMember => "#m",
            PointerKind::HolonymSubstance => "#s",
            PointerKind::HolonymPart => "#p",
            PointerKind::MeronymMember => "%m",
            PointerKind::MeronymSubstance => "%s",
            PointerKind::MeronymPart => "%p",
            PointerKind::Participle => "<",
            PointerKind::Pertainym => "\\",
            PointerKind::SimilarTo => "&",
            PointerKind::DomainTopic => ";c",
            PointerKind::DomainMemberTopic => "-c",
            PointerKind::DomainRegion => ";r",
            PointerKind::DomainMemberRegion => "-r",
            PointerKind::DomainUsage => ";u",
            PointerKind::DomainMemberUsage => "-u",
            PointerKind::VerbGroup => "$",
        }
    }

    /// Resolve a WNDB pointer symbol in the context of the source synset's
    /// part of speech. `\` is a pertainym on adjectives and "derived from
    /// adjective" on adverbs.
    pub fn from_symbol(symbol: &str, pos: PartOfSpeech) -> Option<Self> {
        if symbol == "\\" {
            return Some(match pos {
                PartOfSpeech::Adverb => PointerKind::DerivedFromAdj,
                _ => PointerKind::Pertainym,
            });
        }
        Self::ALL.iter().copied().find(|k| k.symbol() == symbol)
    }
}

impl fmt::Display for PointerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PointerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown pointer kind '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        let mut sorted = PointerKind::ALL;
        sorted.sort();
        assert_eq!(sorted, PointerKind::ALL);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in PointerKind::ALL {
            assert_eq!(kind.name().parse::<PointerKind>(), Ok(kind));
        }
        assert_eq!("hypernym".parse::<PointerKind>(), Ok(PointerKind::Hypernym));
    }

    #[test]
    fn test_backslash_depends_on_pos() {
        assert_eq!(
            PointerKind::from_symbol("\\", PartOfSpeech::Adjective),
            Some(PointerKind::Pertainym)
        );
        assert_eq!(
            PointerKind::from_symbol("\\", PartOfSpeech::Adverb),
            Some(PointerKind::DerivedFromAdj)
        );
    }

    #[test]
    fn test_from_symbol() {
        assert_eq!(PointerKind::from_symbol("@", PartOfSpeech::Noun), Some(PointerKind::Hypernym));
        assert_eq!(PointerKind::from_symbol("%p", PartOfSpeech::Noun), Some(PointerKind::MeronymPart));
        assert_eq!(PointerKind::from_symbol("??", PartOfSpeech::Noun), None);
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&PointerKind::DomainMemberTopic).unwrap();
        assert_eq!(json, "\"DOMAIN_MEMBER_TOPIC\"");
    }
}
