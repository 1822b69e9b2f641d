//! Candela-style sheet: three drives of three actions each, marks and scars

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::common::lenient_i32;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drive {
    Body,
    Cunning,
    Intuition,
}

impl Drive {
    pub const ALL: [Drive; 3] = [Drive::Body, Drive::Cunning, Drive::Intuition];

    pub fn actions(&self) -> [Action; 3] {
        match self {
            Drive::Body => [Action::Move, Action::Attack, Action::Control],
            Drive::Cunning => [Action::Sway, Action::Read, Action::Hide],
            Drive::Intuition => [Action::Search, Action::Focus, Action::Sense],
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Drive::Body => "body",
            Drive::Cunning => "cunning",
            Drive::Intuition => "intuition",
        }
    }
}

impl FromStr for Drive {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Drive::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation(format!("Impulso desconhecido: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Move,
    Attack,
    Control,
    Sway,
    Read,
    Hide,
    Search,
    Focus,
    Sense,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Move,
        Action::Attack,
        Action::Control,
        Action::Sway,
        Action::Read,
        Action::Hide,
        Action::Search,
        Action::Focus,
        Action::Sense,
    ];

    pub fn drive(&self) -> Drive {
        match self {
            Action::Move | Action::Attack | Action::Control => Drive::Body,
            Action::Sway | Action::Read | Action::Hide => Drive::Cunning,
            Action::Search | Action::Focus | Action::Sense => Drive::Intuition,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Action::Move => "move",
            Action::Attack => "attack",
            Action::Control => "control",
            Action::Sway => "sway",
            Action::Read => "read",
            Action::Hide => "hide",
            Action::Search => "search",
            Action::Focus => "focus",
            Action::Sense => "sense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Move => "Mover",
            Action::Attack => "Atacar",
            Action::Control => "Controlar",
            Action::Sway => "Persuadir",
            Action::Read => "Ler",
            Action::Hide => "Esconder",
            Action::Search => "Investigar",
            Action::Focus => "Focar",
            Action::Sense => "Sentir",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Action::ALL
            .into_iter()
            .find(|a| a.key().eq_ignore_ascii_case(s) || a.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation(format!("Ação desconhecida: {}", s)))
    }
}

/// An action's rating; a `dourado` (gilded) action rolls an extra die.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionRating {
    #[serde(deserialize_with = "lenient_i32")]
    pub rating: i32,
    pub dourado: bool,
}

/// Largest impulse checklist a drive can hold.
pub const MAX_IMPULSOS: i32 = 9;

/// Largest mark checklist a track can hold.
pub const MAX_MARKS: i32 = 99;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriveBlock {
    pub actions: BTreeMap<Action, ActionRating>,
    #[serde(deserialize_with = "lenient_i32")]
    pub max_impulsos: i32,
    pub impulsos: Vec<bool>,
    pub acoes: Vec<bool>,
    pub resistencias: Vec<bool>,
}

impl DriveBlock {
    fn for_drive(drive: Drive) -> Self {
        Self {
            actions: drive
                .actions()
                .into_iter()
                .map(|a| (a, ActionRating::default()))
                .collect(),
            ..Self::default()
        }
    }

    /// Resize the impulse checklist to `max` boxes and the resistance
    /// checklist to one box per three impulses, keeping existing ticks.
    pub fn set_max_impulsos(&mut self, max: i32) {
        let max = max.clamp(0, MAX_IMPULSOS);
        self.max_impulsos = max;
        self.impulsos.resize(max as usize, false);
        self.resistencias.resize((max / 3) as usize, false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkTrack {
    Body,
    Mind,
    Blood,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Marks {
    #[serde(deserialize_with = "lenient_i32")]
    pub max_marks: i32,
    pub marks: Vec<bool>,
}

impl Marks {
    pub fn set_max(&mut self, max: i32) {
        let max = max.clamp(0, MAX_MARKS);
        self.max_marks = max;
        self.marks.resize(max as usize, false);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkTracks {
    pub body: Marks,
    pub mind: Marks,
    pub blood: Marks,
}

impl MarkTracks {
    pub fn track_mut(&mut self, track: MarkTrack) -> &mut Marks {
        match track {
            MarkTrack::Body => &mut self.body,
            MarkTrack::Mind => &mut self.mind,
            MarkTrack::Blood => &mut self.blood,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scar {
    pub checked: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandelaStatus {
    pub marks: MarkTracks,
    pub scars: Vec<Scar>,
    #[serde(deserialize_with = "lenient_i32")]
    pub luck: i32,
}

impl Default for CandelaStatus {
    fn default() -> Self {
        Self {
            marks: MarkTracks::default(),
            scars: vec![Scar::default(); 3],
            luck: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandelaSkills {
    pub roleskills: String,
    pub specialtyskills: String,
    pub circleskills: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandelaSheet {
    pub role: String,
    pub specialty: String,
    pub circle: String,
    pub birthplace: String,
    pub body: DriveBlock,
    pub cunning: DriveBlock,
    pub intuition: DriveBlock,
    pub status: CandelaStatus,
    pub skills: CandelaSkills,
}

impl Default for CandelaSheet {
    fn default() -> Self {
        Self {
            role: String::new(),
            specialty: String::new(),
            circle: String::new(),
            birthplace: String::new(),
            body: DriveBlock::for_drive(Drive::Body),
            cunning: DriveBlock::for_drive(Drive::Cunning),
            intuition: DriveBlock::for_drive(Drive::Intuition),
            status: CandelaStatus::default(),
            skills: CandelaSkills::default(),
        }
    }
}

impl CandelaSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drive(&self, drive: Drive) -> &DriveBlock {
        match drive {
            Drive::Body => &self.body,
            Drive::Cunning => &self.cunning,
            Drive::Intuition => &self.intuition,
        }
    }

    pub fn drive_mut(&mut self, drive: Drive) -> &mut DriveBlock {
        match drive {
            Drive::Body => &mut self.body,
            Drive::Cunning => &mut self.cunning,
            Drive::Intuition => &mut self.intuition,
        }
    }

    pub fn action(&self, action: Action) -> ActionRating {
        self.drive(action.drive())
            .actions
            .get(&action)
            .copied()
            .unwrap_or_default()
    }

    pub fn action_mut(&mut self, action: Action) -> &mut ActionRating {
        self.drive_mut(action.drive())
            .actions
            .entry(action)
            .or_default()
    }
}
