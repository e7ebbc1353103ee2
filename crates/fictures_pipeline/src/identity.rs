//! Synthetic identifiers scoped to one pipeline run.

use fictures_core::{
    Chapter, ChapterOutline, Character, CharacterProfile, EntityKind, Part, PartOutline,
    SceneOutline, SceneSummary, Setting, SettingProfile,
};
use std::collections::BTreeMap;

/// Identifier for the `index`-th (1-based) entity of `kind`.
///
/// A pure function of position, so identical runs produce identical ids.
///
/// # Examples
///
/// ```
/// use fictures_core::EntityKind;
/// use fictures_pipeline::synthetic_id;
///
/// assert_eq!(synthetic_id(EntityKind::Part, 2), "part_2");
/// ```
pub fn synthetic_id(kind: EntityKind, index: usize) -> String {
    format!("{}_{}", kind.prefix(), index)
}

/// Hands out `{kind}_{n}` identifiers and stitches parent references onto
/// children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityAssigner {
    issued: BTreeMap<EntityKind, usize>,
}

impl IdentityAssigner {
    /// Create an assigner with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier for `kind`.
    pub fn next_id(&mut self, kind: EntityKind) -> String {
        let counter = self.issued.entry(kind).or_default();
        *counter += 1;
        synthetic_id(kind, *counter)
    }

    /// Identifiers issued so far for `kind`.
    pub fn issued(&self, kind: EntityKind) -> usize {
        self.issued.get(&kind).copied().unwrap_or(0)
    }

    /// Identify a generated character.
    pub fn character(&mut self, profile: CharacterProfile) -> Character {
        Character {
            id: self.next_id(EntityKind::Character),
            profile,
        }
    }

    /// Identify a generated setting.
    pub fn setting(&mut self, profile: SettingProfile) -> Setting {
        Setting {
            id: self.next_id(EntityKind::Setting),
            profile,
        }
    }

    /// Identify a generated part.
    pub fn part(&mut self, outline: PartOutline) -> Part {
        Part {
            id: self.next_id(EntityKind::Part),
            outline,
        }
    }

    /// Identify a generated chapter and point it at its part.
    pub fn chapter(&mut self, outline: ChapterOutline, part: &Part) -> Chapter {
        Chapter {
            id: self.next_id(EntityKind::Chapter),
            part_id: part.id.clone(),
            outline,
        }
    }

    /// Identify a generated scene summary and point it at its chapter.
    pub fn scene_summary(&mut self, outline: SceneOutline, chapter: &Chapter) -> SceneSummary {
        SceneSummary {
            id: self.next_id(EntityKind::Scene),
            chapter_id: chapter.id.clone(),
            outline,
        }
    }
}
