//! Planner configuration.

/// Configuration parameters for graph construction and journey planning.
///
/// All durations derive from static topology and these constants; there is
/// no live-delay input anywhere.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Assumed average vehicle speed used to weight ride edges (km/h).
    pub average_speed_kmh: f64,

    /// Fixed penalty added for every line change (minutes).
    pub transfer_penalty_mins: f64,

    /// Assumed walking speed for estimated walking durations (km/h).
    pub walking_speed_kmh: f64,

    /// Floor applied to every edge weight (minutes).
    /// Prevents zero-weight cycles from degenerating the search.
    pub min_edge_mins: f64,

    /// Fallback ride duration per hop when no ride edge is available to
    /// measure against (minutes).
    pub fallback_mins_per_stop: f64,

    /// How many provider fetches to run in parallel during graph builds.
    pub fetch_batch_size: usize,
}

impl PlannerConfig {
    /// Ride-edge weight in seconds for a hop of `distance_km`.
    ///
    /// `max(min_edge, distance / speed * 60)` minutes, expressed in seconds.
    pub fn ride_secs(&self, distance_km: f64) -> u32 {
        let mins = (distance_km / self.average_speed_kmh * 60.0).max(self.min_edge_mins);
        (mins * 60.0).round() as u32
    }

    /// Same-station interchange weight in seconds, floored like every other
    /// edge weight.
    pub fn transfer_penalty_secs(&self) -> u32 {
        let mins = self.transfer_penalty_mins.max(self.min_edge_mins);
        (mins * 60.0).round() as u32
    }

    /// Walking-transfer weight in seconds: recorded walk time plus the
    /// interchange penalty.
    pub fn walk_transfer_secs(&self, walk_minutes: f64) -> u32 {
        let mins = (walk_minutes + self.transfer_penalty_mins).max(self.min_edge_mins);
        (mins * 60.0).round() as u32
    }

    /// Estimated walking duration in seconds for `distance_km`, floored at
    /// one minute. Used only when no walking edge was traversed.
    pub fn walk_estimate_secs(&self, distance_km: f64) -> u32 {
        let mins = (distance_km / self.walking_speed_kmh * 60.0).max(1.0);
        (mins * 60.0).round() as u32
    }

    /// Fallback per-hop ride duration in seconds.
    pub fn fallback_hop_secs(&self) -> u32 {
        (self.fallback_mins_per_stop * 60.0).round() as u32
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 30.0,
            transfer_penalty_mins: 3.0,
            walking_speed_kmh: 4.5,
            min_edge_mins: 1.0,
            fallback_mins_per_stop: 2.0,
            fetch_batch_size: 8,
        }
    }
}
