use serde::{Deserialize, Deserializer, Serialize};

/// Engine-assigned actor identifier. Ids are only unique within one engine
/// instance and are reused when a new battle is created.
pub type ActorId = u32;

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The two sides of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn index(self) -> u8 {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<Team> {
        match index {
            0 => Some(Team::A),
            1 => Some(Team::B),
            _ => None,
        }
    }

    pub fn other(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

/// Result of the engine's `winner` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Undecided,
    Team(Team),
}

impl Winner {
    /// Maps the raw `-1 | 0 | 1` engine code. Anything unexpected is undecided.
    pub fn from_code(code: i32) -> Winner {
        match code {
            0 => Winner::Team(Team::A),
            1 => Winner::Team(Team::B),
            _ => Winner::Undecided,
        }
    }

    pub fn team(self) -> Option<Team> {
        match self {
            Winner::Team(team) => Some(team),
            Winner::Undecided => None,
        }
    }
}

/// Actor status toggled by `StatusChange` events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Miss,
    Fleeing,
    Other(String),
}

impl Status {
    pub fn parse(raw: &str) -> Status {
        match raw {
            "miss" => Status::Miss,
            "fleeing" => Status::Fleeing,
            other => Status::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Miss => "miss",
            Status::Fleeing => "fleeing",
            Status::Other(name) => name,
        }
    }
}

/// One already-resolved combat event, in engine causal order.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedEvent {
    Move {
        actor: ActorId,
        from: Cell,
        to: Cell,
    },
    Hit {
        attacker: ActorId,
        defender: ActorId,
        part: String,
        damage: u32,
        attack_name: String,
    },
    Bleed {
        actor: ActorId,
        amount: u32,
    },
    Sever {
        actor: ActorId,
        part: String,
        debris_glyph: char,
        pos: Cell,
    },
    Death {
        actor: ActorId,
        pos: Cell,
    },
    Vomit {
        actor: ActorId,
        amount: u32,
        pos: Cell,
    },
    StatusChange {
        actor: ActorId,
        status: Status,
        active: bool,
    },
    Bump {
        bumper: ActorId,
        bumped: ActorId,
        to: Cell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridInfo {
    pub width: i32,
    pub height: i32,
}

impl GridInfo {
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Clamps a cell into the grid bounds.
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.x.clamp(0, (self.width - 1).max(0)),
            cell.y.clamp(0, (self.height - 1).max(0)),
        )
    }
}

/// Read-only projection of one actor at the current tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub id: ActorId,
    #[serde(alias = "speciesId")]
    pub species_id: String,
    #[serde(deserialize_with = "first_char")]
    pub glyph: char,
    pub team: u8,
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    #[serde(alias = "maxHp")]
    pub max_hp: i32,
    #[serde(rename = "is_alive", alias = "alive", alias = "isAlive")]
    pub alive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ActorSnapshot {
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

/// Full battle state as reported by the engine's `snapshot` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub seed: u64,
    #[serde(alias = "tickCount")]
    pub tick_count: u64,
    pub finished: bool,
    pub winner: Option<u8>,
    pub grid: GridInfo,
    #[serde(alias = "teamA")]
    pub team_a: Vec<ActorSnapshot>,
    #[serde(alias = "teamB")]
    pub team_b: Vec<ActorSnapshot>,
}

impl BattleSnapshot {
    pub fn actors(&self) -> impl Iterator<Item = &ActorSnapshot> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    pub fn actor(&self, id: ActorId) -> Option<&ActorSnapshot> {
        self.actors().find(|a| a.id == id)
    }

    pub fn team(&self, team: Team) -> &[ActorSnapshot] {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    pub fn alive_count(&self, team: Team) -> usize {
        self.team(team).iter().filter(|a| a.alive).count()
    }
}

/// One entry of the `initialize` team arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub species_id: String,
}

impl TeamMember {
    pub fn new(species_id: impl Into<String>) -> Self {
        Self {
            species_id: species_id.into(),
        }
    }

    /// `count` copies of the same species.
    pub fn squad(species_id: &str, count: u32) -> Vec<TeamMember> {
        (0..count).map(|_| TeamMember::new(species_id)).collect()
    }
}

/// Glyphs travel as strings; only the first character is meaningful.
fn first_char<'de, D>(deserializer: D) -> Result<char, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.chars().next().unwrap_or(' '))
}
