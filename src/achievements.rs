//! Achievement records and the pure evaluator that unlocks them.

/// Which run statistic an achievement is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Score,
    EnemiesDefeated,
    SurvivalTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub trigger: Trigger,
    pub requirement: u64,
    pub unlocked: bool,
}

impl Achievement {
    const fn locked(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        icon: &'static str,
        trigger: Trigger,
        requirement: u64,
    ) -> Self {
        Achievement { id, name, description, icon, trigger, requirement, unlocked: false }
    }

    fn is_met(&self, stats: &RunStats) -> bool {
        let value = match self.trigger {
            Trigger::Score => stats.score,
            Trigger::EnemiesDefeated => stats.enemies_defeated as u64,
            Trigger::SurvivalTime => stats.survival_secs,
        };
        value >= self.requirement
    }
}

/// The statistics of a run that achievements are checked against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub score: u64,
    pub enemies_defeated: u32,
    pub survival_secs: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub achievements: Vec<Achievement>,
    /// Achievements that went from locked to unlocked in this call.
    pub newly_unlocked: Vec<Achievement>,
}

/// The locked achievement set every fresh run starts with.
pub fn default_achievements() -> Vec<Achievement> {
    vec![
        Achievement::locked("first_blood", "First Blood", "Destroy your first enemy", "🎯", Trigger::EnemiesDefeated, 1),
        Achievement::locked("exterminator", "Exterminator", "Destroy 25 enemies", "💥", Trigger::EnemiesDefeated, 25),
        Achievement::locked("point_collector", "Point Collector", "Score 1,000 points", "⭐", Trigger::Score, 1_000),
        Achievement::locked("high_roller", "High Roller", "Score 5,000 points", "🏆", Trigger::Score, 5_000),
        Achievement::locked("survivor", "Survivor", "Survive for 30 seconds", "⏱", Trigger::SurvivalTime, 30),
        Achievement::locked("iron_pilot", "Iron Pilot", "Survive for 2 minutes", "🛡", Trigger::SurvivalTime, 120),
    ]
}

/// Unlock every locked achievement whose requirement `stats` meets.
///
/// Unlocked entries are never re-locked, so calling this twice with the same
/// stats yields the same set and an empty `newly_unlocked` the second time.
pub fn evaluate(achievements: &[Achievement], stats: &RunStats) -> Evaluation {
    let mut newly_unlocked = Vec::new();
    let achievements = achievements
        .iter()
        .map(|a| {
            if !a.unlocked && a.is_met(stats) {
                let unlocked = Achievement { unlocked: true, ..a.clone() };
                newly_unlocked.push(unlocked.clone());
                unlocked
            } else {
                a.clone()
            }
        })
        .collect();

    Evaluation { achievements, newly_unlocked }
}
