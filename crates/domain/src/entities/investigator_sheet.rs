//! Investigator sheet: eight characteristics, free-form skills, sanity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::lenient_i32;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Characteristic {
    Str,
    Con,
    Siz,
    Dex,
    App,
    Int,
    Pow,
    Edu,
}

impl Characteristic {
    pub const ALL: [Characteristic; 8] = [
        Characteristic::Str,
        Characteristic::Con,
        Characteristic::Siz,
        Characteristic::Dex,
        Characteristic::App,
        Characteristic::Int,
        Characteristic::Pow,
        Characteristic::Edu,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Characteristic::Str => "str",
            Characteristic::Con => "con",
            Characteristic::Siz => "siz",
            Characteristic::Dex => "dex",
            Characteristic::App => "app",
            Characteristic::Int => "int",
            Characteristic::Pow => "pow",
            Characteristic::Edu => "edu",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Characteristic::Str => "Força",
            Characteristic::Con => "Constituição",
            Characteristic::Siz => "Tamanho",
            Characteristic::Dex => "Destreza",
            Characteristic::App => "Aparência",
            Characteristic::Int => "Inteligência",
            Characteristic::Pow => "Poder",
            Characteristic::Edu => "Educação",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Characteristic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Characteristic::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s) || c.label() == s)
            .ok_or_else(|| DomainError::validation(format!("Característica desconhecida: {}", s)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Characteristics {
    #[serde(rename = "str", deserialize_with = "lenient_i32")]
    pub strength: i32,
    #[serde(rename = "con", deserialize_with = "lenient_i32")]
    pub constitution: i32,
    #[serde(rename = "siz", deserialize_with = "lenient_i32")]
    pub size: i32,
    #[serde(rename = "dex", deserialize_with = "lenient_i32")]
    pub dexterity: i32,
    #[serde(rename = "app", deserialize_with = "lenient_i32")]
    pub appearance: i32,
    #[serde(rename = "int", deserialize_with = "lenient_i32")]
    pub intelligence: i32,
    #[serde(rename = "pow", deserialize_with = "lenient_i32")]
    pub power: i32,
    #[serde(rename = "edu", deserialize_with = "lenient_i32")]
    pub education: i32,
}

impl Characteristics {
    pub fn get(&self, c: Characteristic) -> i32 {
        match c {
            Characteristic::Str => self.strength,
            Characteristic::Con => self.constitution,
            Characteristic::Siz => self.size,
            Characteristic::Dex => self.dexterity,
            Characteristic::App => self.appearance,
            Characteristic::Int => self.intelligence,
            Characteristic::Pow => self.power,
            Characteristic::Edu => self.education,
        }
    }

    pub fn set(&mut self, c: Characteristic, value: i32) {
        let slot = match c {
            Characteristic::Str => &mut self.strength,
            Characteristic::Con => &mut self.constitution,
            Characteristic::Siz => &mut self.size,
            Characteristic::Dex => &mut self.dexterity,
            Characteristic::App => &mut self.appearance,
            Characteristic::Int => &mut self.intelligence,
            Characteristic::Pow => &mut self.power,
            Characteristic::Edu => &mut self.education,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestigatorSkill {
    pub name: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub value: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pool {
    #[serde(deserialize_with = "lenient_i32")]
    pub current: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub max: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestigatorSheet {
    pub occupation: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub age: i32,
    pub characteristics: Characteristics,
    pub skills: Vec<InvestigatorSkill>,
    #[serde(deserialize_with = "lenient_i32")]
    pub sanity: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub luck: i32,
    pub hit_points: Pool,
    pub magic_points: Pool,
}

impl InvestigatorSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive lookup of a free-form skill.
    pub fn skill(&self, name: &str) -> Option<&InvestigatorSkill> {
        let name = name.trim();
        self.skills.iter().find(|s| s.name.trim().eq_ignore_ascii_case(name))
    }
}
