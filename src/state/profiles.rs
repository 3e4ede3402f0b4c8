//! Built-in timer profiles for common combat-sport rulesets

use serde::Serialize;

use super::timer_state::TimerConfig;

/// A named timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerProfile {
    pub name: &'static str,
    pub config: TimerConfig,
}

pub static PROFILES: [TimerProfile; 4] = [
    TimerProfile { name: "Boxing", config: TimerConfig::new(12, 180, 60, 25, 10) },
    TimerProfile { name: "MMA", config: TimerConfig::new(5, 300, 60, 30, 10) },
    TimerProfile { name: "Muay Thai", config: TimerConfig::new(5, 180, 120, 30, 10) },
    TimerProfile { name: "Kickboxing", config: TimerConfig::new(10, 180, 60, 25, 10) },
];

/// Look a profile up by name, ignoring case
pub fn find_profile(name: &str) -> Option<&'static TimerProfile> {
    PROFILES.iter().find(|profile| profile.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_profile_ignores_case() {
        let profile = find_profile("muay thai").expect("profile");
        assert_eq!(profile.name, "Muay Thai");
        assert_eq!(profile.config.rest_duration_seconds, 120);
        assert!(find_profile("Sumo").is_none());
    }

    #[test]
    fn test_boxing_matches_default_config() {
        let boxing = find_profile("Boxing").expect("profile");
        assert_eq!(boxing.config, TimerConfig::default());
    }
}
