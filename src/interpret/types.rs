use crate::core::constants::{
    COMBAT_LOG_CAPACITY, SEVERITY_GRIEVOUS_DAMAGE, SEVERITY_SCRATCHING_DAMAGE,
    SEVERITY_WOUNDING_DAMAGE,
};
use crate::palette::NamedColor;
use crate::settings::{GoreProfile, Settings};
use std::collections::VecDeque;

/// How bad a hit was, by damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Grievous,
    Wounding,
    Scratching,
    Barely,
}

impl Severity {
    pub fn for_damage(damage: u32) -> Severity {
        if damage >= SEVERITY_GRIEVOUS_DAMAGE {
            Severity::Grievous
        } else if damage >= SEVERITY_WOUNDING_DAMAGE {
            Severity::Wounding
        } else if damage >= SEVERITY_SCRATCHING_DAMAGE {
            Severity::Scratching
        } else {
            Severity::Barely
        }
    }
}

/// Attack family, picked from keywords in the engine's attack name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Peck,
    Bite,
    Scratch,
    Claw,
    Sting,
    Ram,
    Kick,
    Bash,
    Gore,
    Other,
}

impl AttackKind {
    pub fn from_attack_name(name: &str) -> AttackKind {
        let name = name.to_ascii_lowercase();
        const KEYWORDS: [(&str, AttackKind); 9] = [
            ("peck", AttackKind::Peck),
            ("bite", AttackKind::Bite),
            ("scratch", AttackKind::Scratch),
            ("claw", AttackKind::Claw),
            ("sting", AttackKind::Sting),
            ("ram", AttackKind::Ram),
            ("kick", AttackKind::Kick),
            ("bash", AttackKind::Bash),
            ("gore", AttackKind::Gore),
        ];
        KEYWORDS
            .iter()
            .find(|(keyword, _)| name.contains(keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(AttackKind::Other)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub color: NamedColor,
    pub is_critical: bool,
}

/// Scrolling combat log, oldest lines dropped past capacity.
#[derive(Debug, Clone)]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::with_capacity(COMBAT_LOG_CAPACITY)
    }
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, text: impl Into<String>, color: NamedColor, is_critical: bool) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            text: text.into(),
            color,
            is_critical,
        });
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Gore profile plus motion scale: everything that tunes interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpretConfig {
    pub gore: GoreProfile,
    pub motion_scale: f64,
}

impl InterpretConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            gore: settings.gore_intensity.profile(),
            motion_scale: settings.motion_scale(),
        }
    }
}

impl Default for InterpretConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_bands() {
        assert_eq!(Severity::for_damage(20), Severity::Grievous);
        assert_eq!(Severity::for_damage(15), Severity::Grievous);
        assert_eq!(Severity::for_damage(14), Severity::Wounding);
        assert_eq!(Severity::for_damage(8), Severity::Wounding);
        assert_eq!(Severity::for_damage(3), Severity::Scratching);
        assert_eq!(Severity::for_damage(2), Severity::Barely);
        assert_eq!(Severity::for_damage(0), Severity::Barely);
    }

    #[test]
    fn test_attack_kind_keywords() {
        assert_eq!(AttackKind::from_attack_name("Beak Peck"), AttackKind::Peck);
        assert_eq!(AttackKind::from_attack_name("bite"), AttackKind::Bite);
        assert_eq!(AttackKind::from_attack_name("Horn GORE"), AttackKind::Gore);
        assert_eq!(AttackKind::from_attack_name("flail"), AttackKind::Other);
    }

    #[test]
    fn test_log_drops_oldest_past_capacity() {
        let mut log = CombatLog::with_capacity(3);
        for i in 0..5 {
            log.push(format!("line {}", i), NamedColor::White, false);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.entries().next().map(|e| e.text.as_str()), Some("line 2"));
        assert_eq!(log.last().map(|e| e.text.as_str()), Some("line 4"));
    }

    #[test]
    fn test_config_from_settings() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let config = InterpretConfig::from_settings(&settings);
        assert_eq!(config.motion_scale, 0.5);
        assert_eq!(config.gore.gib_count, 3);
    }
}
