/// Every threshold the analysis functions consult, gathered in one
/// tunable structure so the algorithm code carries no scattered
/// literals. Defaults are the dial-in rules of thumb for espresso.
#[derive(Debug, Clone)]
pub struct BrewTuning {
    /// Optimal extraction window, seconds, inclusive.
    pub optimal_time_min: i64,
    pub optimal_time_max: i64,

    /// Acceptable extraction window, seconds, inclusive.
    pub acceptable_time_min: i64,
    pub acceptable_time_max: i64,

    /// Optimal brew ratio band, inclusive.
    pub optimal_ratio_min: f64,
    pub optimal_ratio_max: f64,

    /// Acceptable brew ratio band, inclusive. Checked after the optimal
    /// band, so its upper end sitting below the optimal one is
    /// intentional.
    pub acceptable_ratio_min: f64,
    pub acceptable_ratio_max: f64,

    /// Deviation-from-bean-average bands for the consistency component.
    pub consistency_ratio_band: f64,
    pub consistency_time_band: f64,

    /// Tighter bands that earn the deviation bonus.
    pub bonus_ratio_band: f64,
    pub bonus_time_band: f64,

    /// Ratio drift from the bean average that flags an inconsistency.
    pub ratio_inconsistency_band: f64,

    /// Score tier thresholds: >= excellent, >= good, below is needs-work.
    pub tier_excellent: i64,
    pub tier_good: i64,

    /// How far the recent average must move off the overall average
    /// before the trend leaves STABLE.
    pub trend_margin: i64,

    /// Number of most-recent shots in the recent average.
    pub recent_window: usize,

    /// Advisor step scaling: deviations up to `one_step_deviation`
    /// seconds ask for one step, up to `two_step_deviation` two, and
    /// everything past that `max_steps`.
    pub one_step_deviation: i64,
    pub two_step_deviation: i64,
    pub max_steps: i64,

    /// |deviation| at or past this counts as strong timing evidence for
    /// the confidence table.
    pub strong_timing_deviation: i64,

    /// A bean needs more than this many shots before ranking and
    /// personal-best flags are reported.
    pub ranking_min_shots: usize,
}

impl Default for BrewTuning {
    fn default() -> Self {
        Self {
            optimal_time_min: 25,
            optimal_time_max: 30,
            acceptable_time_min: 20,
            acceptable_time_max: 35,
            optimal_ratio_min: 1.5,
            optimal_ratio_max: 3.0,
            acceptable_ratio_min: 1.3,
            acceptable_ratio_max: 2.8,
            consistency_ratio_band: 0.3,
            consistency_time_band: 5.0,
            bonus_ratio_band: 0.1,
            bonus_time_band: 2.0,
            ratio_inconsistency_band: 0.5,
            tier_excellent: 85,
            tier_good: 60,
            trend_margin: 5,
            recent_window: 5,
            one_step_deviation: 3,
            two_step_deviation: 6,
            max_steps: 3,
            strong_timing_deviation: 3,
            ranking_min_shots: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The defaults are load-bearing for every analysis function, so pin
    // each one. A drift here silently reshapes scores, trends, and
    // advisor steps everywhere downstream.
    #[test]
    fn defaults_match_the_dial_in_rules_of_thumb() {
        let tuning = BrewTuning::default();

        assert_eq!(tuning.optimal_time_min, 25);
        assert_eq!(tuning.optimal_time_max, 30);
        assert_eq!(tuning.acceptable_time_min, 20);
        assert_eq!(tuning.acceptable_time_max, 35);

        assert_eq!(tuning.optimal_ratio_min, 1.5);
        assert_eq!(tuning.optimal_ratio_max, 3.0);
        assert_eq!(tuning.acceptable_ratio_min, 1.3);
        assert_eq!(tuning.acceptable_ratio_max, 2.8);

        assert_eq!(tuning.consistency_ratio_band, 0.3);
        assert_eq!(tuning.consistency_time_band, 5.0);
        assert_eq!(tuning.bonus_ratio_band, 0.1);
        assert_eq!(tuning.bonus_time_band, 2.0);
        assert_eq!(tuning.ratio_inconsistency_band, 0.5);

        assert_eq!(tuning.tier_excellent, 85);
        assert_eq!(tuning.tier_good, 60);
        assert_eq!(tuning.trend_margin, 5);
        assert_eq!(tuning.recent_window, 5);

        assert_eq!(tuning.one_step_deviation, 3);
        assert_eq!(tuning.two_step_deviation, 6);
        assert_eq!(tuning.max_steps, 3);
        assert_eq!(tuning.strong_timing_deviation, 3);
        assert_eq!(tuning.ranking_min_shots, 3);
    }

    #[test]
    fn acceptable_ratio_ceiling_sits_below_the_optimal_one() {
        let tuning = BrewTuning::default();
        assert!(tuning.acceptable_ratio_max < tuning.optimal_ratio_max);
    }
}
