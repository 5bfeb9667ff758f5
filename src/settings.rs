//! Player settings: gore intensity and reduced motion, persisted as JSON.

use crate::core::constants::{REDUCED_MOTION_SCALE, SETTINGS_FILE};
use crate::utils::persistence::{load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoreIntensity {
    Tame,
    #[default]
    Normal,
    Grotesque,
}

/// The effect knobs a gore level turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoreProfile {
    /// Gib blips spawned per sever.
    pub gib_count: u32,
    /// Multiplier on particle TTLs.
    pub particle_duration: f64,
    /// Chance a bleed leaves a stain.
    pub blood_stain_chance: f64,
    pub tint_opacity: f64,
    /// Whether new stains fade instead of staying.
    pub fade_marks: bool,
}

impl GoreIntensity {
    pub const ALL: [GoreIntensity; 3] = [
        GoreIntensity::Tame,
        GoreIntensity::Normal,
        GoreIntensity::Grotesque,
    ];

    pub fn profile(self) -> GoreProfile {
        match self {
            GoreIntensity::Tame => GoreProfile {
                gib_count: 1,
                particle_duration: 0.5,
                blood_stain_chance: 0.1,
                tint_opacity: 0.1,
                fade_marks: true,
            },
            GoreIntensity::Normal => GoreProfile {
                gib_count: 3,
                particle_duration: 1.0,
                blood_stain_chance: 0.4,
                tint_opacity: 0.3,
                fade_marks: false,
            },
            GoreIntensity::Grotesque => GoreProfile {
                gib_count: 6,
                particle_duration: 1.5,
                blood_stain_chance: 0.8,
                tint_opacity: 0.6,
                fade_marks: false,
            },
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GoreIntensity::Tame => "Tame",
            GoreIntensity::Normal => "Normal",
            GoreIntensity::Grotesque => "Grotesque",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GoreIntensity::Tame => "Minimal blood and effects",
            GoreIntensity::Normal => "Moderate violence",
            GoreIntensity::Grotesque => "Maximum carnage",
        }
    }

    /// Cycles tame -> normal -> grotesque -> tame.
    pub fn next(self) -> GoreIntensity {
        match self {
            GoreIntensity::Tame => GoreIntensity::Normal,
            GoreIntensity::Normal => GoreIntensity::Grotesque,
            GoreIntensity::Grotesque => GoreIntensity::Tame,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub gore_intensity: GoreIntensity,
    pub reduced_motion: bool,
}

impl Settings {
    /// Loads `settings.json`, falling back to defaults when missing or corrupt.
    pub fn load() -> Self {
        load_json_or_default(SETTINGS_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(SETTINGS_FILE, self)
    }

    /// TTL scale applied to every spawned effect.
    pub fn motion_scale(&self) -> f64 {
        if self.reduced_motion {
            REDUCED_MOTION_SCALE
        } else {
            1.0
        }
    }
}
